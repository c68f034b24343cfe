//! Epsilon-greedy move selection
//!
//! With probability ε the engine explores with a uniformly random legal move
//! and touches neither the search nor the transposition table. Otherwise it
//! exploits the tree search. Exploration only happens while learning is
//! enabled.

use super::engine::Engine;
use crate::error::{EngineError, EngineResult};
use crate::rules::{self, describe_move, position_id};
use crate::search::{search, SearchResult};
use rand::Rng;
use shakmaty::{Chess, Color, Move, Position};
use tracing::debug;

impl Engine {
    /// Pick the move to play from `pos` and record the ply.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::TerminalPosition`] for finished games and
    /// [`EngineError::NoLegalMoves`] when nothing can be played.
    pub fn choose_move(&mut self, pos: &Chess) -> EngineResult<Move> {
        let id = position_id(pos);
        if rules::is_terminal(pos) {
            return Err(EngineError::TerminalPosition {
                position: id.to_string(),
            });
        }

        let moves = rules::legal_moves(pos);
        if moves.is_empty() {
            return Err(EngineError::NoLegalMoves {
                position: id.to_string(),
            });
        }

        let mv = if self.should_explore() {
            let index = self.rng.random_range(0..moves.len());
            let mv = moves[index].clone();
            debug!(
                "[ENGINE] Exploring with {} (epsilon {:.3})",
                describe_move(pos, &mv),
                self.store.epsilon()
            );
            mv
        } else {
            let result = self.best_move(pos)?;
            match result.best_move {
                Some(mv) => {
                    debug!(
                        "[ENGINE] Playing {} (score {})",
                        describe_move(pos, &mv),
                        result.score
                    );
                    mv
                }
                None => {
                    return Err(EngineError::BestMoveNotSet {
                        depth: self.config.search.depth,
                    })
                }
            }
        };

        self.store.record_ply(id);
        Ok(mv)
    }

    /// Search `pos` at the configured depth without exploring or recording
    pub fn best_move(&mut self, pos: &Chess) -> EngineResult<SearchResult> {
        if !self.config.search.retain_transpositions {
            self.transpositions.clear();
        }

        let maximizing = pos.turn() == Color::White;
        let result = search(
            pos,
            self.config.search.depth,
            maximizing,
            &self.store,
            &mut self.transpositions,
        )?;
        self.last_search = Some(result.stats);
        Ok(result)
    }

    fn should_explore(&mut self) -> bool {
        let epsilon = self.store.epsilon();
        self.store.is_enabled() && epsilon > 0.0 && self.rng.random::<f64>() < epsilon
    }
}
