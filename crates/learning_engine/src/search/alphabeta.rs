//! Alpha-beta minimax
//!
//! Scores are white-relative throughout: white plies maximize, black plies
//! minimize. Only a strict improvement replaces the current best move, so on
//! equal scores the first move in ordered enumeration wins.

use super::ordering::{order_moves, OrderingTables};
use super::transposition::TranspositionTable;
use super::SearchStats;
use crate::constants::MATE_SCORE;
use crate::evaluation::evaluate_identified;
use crate::learning::LearningStore;
use crate::rules::{self, position_id};
use crate::types::{Bound, Score};
use shakmaty::{Chess, Color, Move, Outcome};

/// Recursive search state shared by every node of one search call
pub(crate) struct Searcher<'a> {
    store: &'a LearningStore,
    tt: &'a mut TranspositionTable,
    ordering: OrderingTables,
    pub(crate) stats: SearchStats,
}

impl<'a> Searcher<'a> {
    pub(crate) fn new(store: &'a LearningStore, tt: &'a mut TranspositionTable) -> Self {
        Self {
            store,
            tt,
            ordering: OrderingTables::new(),
            stats: SearchStats::default(),
        }
    }

    /// Minimax value of `pos` searched `depth` plies deep.
    ///
    /// `ply` is the distance from the root, used to prefer shorter mates.
    pub(crate) fn alphabeta(
        &mut self,
        pos: &Chess,
        depth: u32,
        ply: u32,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
    ) -> (Score, Option<Move>) {
        self.stats.nodes += 1;

        // Terminal nodes never reach the evaluator
        if let Some(outcome) = rules::outcome(pos) {
            return (terminal_score(outcome, ply), None);
        }

        let id = position_id(pos);

        if depth == 0 {
            return (evaluate_identified(pos, &id, self.store), None);
        }

        let mut tt_move = None;
        if let Some(entry) = self.tt.probe(&id, ply) {
            if entry.depth >= depth {
                self.stats.tt_hits += 1;
                match entry.bound {
                    Bound::Exact => return (entry.score, entry.best_move),
                    Bound::Lower => alpha = alpha.max(entry.score),
                    Bound::Upper => beta = beta.min(entry.score),
                }
                if alpha >= beta {
                    self.stats.cutoffs += 1;
                    return (entry.score, entry.best_move);
                }
            }
            tt_move = entry.best_move;
        }

        // Window actually searched, used to classify the stored bound
        let (window_alpha, window_beta) = (alpha, beta);

        let mut moves = rules::legal_moves(pos);
        order_moves(&mut moves, tt_move.as_ref(), &self.ordering, ply);

        let mut best_move = None;
        let mut best_score = if maximizing { Score::MIN } else { Score::MAX };

        for mv in moves {
            let child = rules::apply_unchecked(pos, &mv);
            let (score, _) = self.alphabeta(&child, depth - 1, ply + 1, alpha, beta, !maximizing);

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(mv.clone());
                }
                alpha = alpha.max(score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(mv.clone());
                }
                beta = beta.min(score);
            }

            if alpha >= beta {
                self.stats.cutoffs += 1;
                self.ordering.record_cutoff(&mv, ply, depth);
                break;
            }
        }

        let bound = if best_score <= window_alpha {
            Bound::Upper
        } else if best_score >= window_beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.tt.store(id, ply, best_score, depth, best_move.clone(), bound);
        self.stats.tt_stores += 1;

        (best_score, best_move)
    }
}

/// Mate scores shrink with distance so nearer mates are preferred
fn terminal_score(outcome: Outcome, ply: u32) -> Score {
    let mate = MATE_SCORE - ply as Score;
    match outcome {
        Outcome::Decisive {
            winner: Color::White,
        } => mate,
        Outcome::Decisive {
            winner: Color::Black,
        } => -mate,
        Outcome::Draw => 0,
    }
}
