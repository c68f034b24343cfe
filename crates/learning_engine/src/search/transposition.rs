//! Transposition table
//!
//! Caches search results by [`PositionId`] so transposed positions are not
//! searched twice. Bounded with LRU eviction; mate scores are stored relative
//! to the node so they stay valid when the same position is reached at a
//! different ply.

use crate::cache::LruCache;
use crate::constants::MATE_THRESHOLD;
use crate::types::{Bound, PositionId, Score};
use shakmaty::Move;

/// Cached result for one position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtEntry {
    /// White-relative score, mate distances relative to this node
    pub score: Score,
    /// Remaining depth the score was searched to
    pub depth: u32,
    pub best_move: Option<Move>,
    pub bound: Bound,
}

#[derive(Debug, Clone)]
pub struct TranspositionTable {
    entries: LruCache<PositionId, TtEntry>,
}

impl TranspositionTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// Look up `id` as seen `ply` plies below the root
    pub fn probe(&mut self, id: &PositionId, ply: u32) -> Option<TtEntry> {
        let mut entry = self.entries.get(id)?.clone();
        entry.score = score_from_tt(entry.score, ply);
        Some(entry)
    }

    pub fn store(
        &mut self,
        id: PositionId,
        ply: u32,
        score: Score,
        depth: u32,
        best_move: Option<Move>,
        bound: Bound,
    ) {
        self.entries.insert(
            id,
            TtEntry {
                score: score_to_tt(score, ply),
                depth,
                best_move,
                bound,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn set_capacity(&mut self, capacity: usize) {
        self.entries.set_capacity(capacity);
    }
}

fn score_to_tt(score: Score, ply: u32) -> Score {
    let ply = ply as Score;
    if score > MATE_THRESHOLD {
        score + ply
    } else if score < -MATE_THRESHOLD {
        score - ply
    } else {
        score
    }
}

fn score_from_tt(score: Score, ply: u32) -> Score {
    let ply = ply as Score;
    if score > MATE_THRESHOLD {
        score - ply
    } else if score < -MATE_THRESHOLD {
        score + ply
    } else {
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MATE_SCORE;

    #[test]
    fn test_store_and_probe() {
        let mut tt = TranspositionTable::new(8);
        let id = PositionId::from("k7/8/8/8/8/8/8/K7 w - -");
        tt.store(id.clone(), 0, 42, 3, None, Bound::Exact);

        let entry = tt.probe(&id, 0).unwrap();
        assert_eq!(entry.score, 42);
        assert_eq!(entry.depth, 3);
        assert_eq!(entry.bound, Bound::Exact);
    }

    #[test]
    fn test_mate_scores_follow_ply() {
        let mut tt = TranspositionTable::new(8);
        let id = PositionId::from("mate-node");
        // mate found 5 plies from the root while the node sat at ply 2
        tt.store(id.clone(), 2, MATE_SCORE - 5, 3, None, Bound::Exact);

        // same node reached at ply 4: mate is two plies further away
        assert_eq!(tt.probe(&id, 4).unwrap().score, MATE_SCORE - 7);
    }

    #[test]
    fn test_capacity_is_bounded() {
        let mut tt = TranspositionTable::new(2);
        for i in 0..5 {
            tt.store(PositionId::new(format!("p{i}")), 0, i, 1, None, Bound::Lower);
        }
        assert_eq!(tt.len(), 2);
        assert!(tt.probe(&PositionId::from("p0"), 0).is_none());
        assert!(tt.probe(&PositionId::from("p4"), 0).is_some());
    }
}
