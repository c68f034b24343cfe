//! Depth-bounded adversarial search
//!
//! This module implements the engine's tree search using:
//! - Minimax with alpha-beta pruning (white maximizes, black minimizes)
//! - Transposition table keyed by position identity, LRU-bounded
//! - Move ordering (MVV-LVA, killer moves, history heuristic) for better pruning
//!
//! ## Module Organization
//!
//! - `alphabeta` - Core alpha-beta search algorithm
//! - `ordering` - Move ordering heuristics
//! - `transposition` - Transposition table with mate-aware scores

mod alphabeta;
mod ordering;
mod transposition;

pub use transposition::{TranspositionTable, TtEntry};

use crate::constants::SEARCH_INFINITY;
use crate::error::{EngineError, EngineResult};
use crate::learning::LearningStore;
use crate::rules::{self, position_id};
use crate::types::Score;
use alphabeta::Searcher;
use shakmaty::{Chess, Move};
use tracing::debug;

/// Counters collected during one search call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
    pub tt_hits: u64,
    pub tt_stores: u64,
}

/// Result of a tree search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Minimax score from white's point of view
    pub score: Score,
    /// Best move at the root; `None` only for depth-0 searches
    pub best_move: Option<Move>,
    pub stats: SearchStats,
}

/// Search `pos` to `depth` plies.
///
/// `maximizing` is true when the side to move wants the highest
/// white-relative score, i.e. when white is to move.
///
/// # Errors
///
/// Returns [`EngineError::TerminalPosition`] when `pos` is already decided.
pub fn search(
    pos: &Chess,
    depth: u32,
    maximizing: bool,
    store: &LearningStore,
    tt: &mut TranspositionTable,
) -> EngineResult<SearchResult> {
    if rules::is_terminal(pos) {
        return Err(EngineError::TerminalPosition {
            position: position_id(pos).to_string(),
        });
    }

    let mut searcher = Searcher::new(store, tt);
    let (score, best_move) =
        searcher.alphabeta(pos, depth, 0, -SEARCH_INFINITY, SEARCH_INFINITY, maximizing);
    let stats = searcher.stats;

    debug!(
        "[SEARCH] depth {} score {} nodes {} cutoffs {} tt hits {} tt stores {}",
        depth, score, stats.nodes, stats.cutoffs, stats.tt_hits, stats.tt_stores
    );

    Ok(SearchResult {
        score,
        best_move,
        stats,
    })
}
