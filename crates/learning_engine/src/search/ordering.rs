//! Move ordering for alpha-beta pruning
//!
//! Orders moves to maximize alpha-beta pruning efficiency by trying
//! the most promising moves first: the cached best move, then captures
//! (MVV-LVA), promotions, killer moves, the history heuristic and moves
//! toward the centre.
//!
//! Killers and history only ever rank quiet moves (no capture, no
//! promotion). Both tables live for a single search call.

use crate::evaluation::piece_value;
use shakmaty::{Move, Square};

const KILLER_PRIMARY_BONUS: i32 = 900;
const KILLER_SECONDARY_BONUS: i32 = 800;

/// History scores are halved across the board once one of them passes this,
/// which keeps them below the killer bonuses
const HISTORY_LIMIT: i32 = 512;

/// Ordering key, higher is searched first
fn move_score(mv: &Move) -> i32 {
    let mut score = 0;

    // MVV-LVA: Most Valuable Victim - Least Valuable Attacker
    if let Some(victim) = mv.capture() {
        score += 10_000 + piece_value(victim) * 10 - piece_value(mv.role());
    }

    if let Some(promotion) = mv.promotion() {
        score += 5_000 + piece_value(promotion);
    }

    score + centre_bonus(mv.to())
}

/// 0 on the rim corners up to 12 on the four centre squares
fn centre_bonus(square: Square) -> i32 {
    let index = usize::from(square) as i32;
    let (file, rank) = (index % 8, index / 8);
    let distance = (2 * file - 7).abs() + (2 * rank - 7).abs();
    14 - distance
}

fn is_quiet(mv: &Move) -> bool {
    mv.capture().is_none() && mv.promotion().is_none()
}

/// Killer moves per ply and from-to history scores gathered during one search
pub(crate) struct OrderingTables {
    killers: Vec<[Option<Move>; 2]>,
    history: Box<[[i32; 64]; 64]>,
}

impl Default for OrderingTables {
    fn default() -> Self {
        Self {
            killers: Vec::new(),
            history: Box::new([[0; 64]; 64]),
        }
    }
}

impl OrderingTables {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Remember a quiet move that caused a beta cutoff at `ply` with `depth`
    /// plies left
    pub(crate) fn record_cutoff(&mut self, mv: &Move, ply: u32, depth: u32) {
        if !is_quiet(mv) {
            return;
        }

        let ply = ply as usize;
        if self.killers.len() <= ply {
            self.killers.resize(ply + 1, [None, None]);
        }
        let slots = &mut self.killers[ply];
        if slots[0].as_ref() != Some(mv) {
            slots[1] = slots[0].take();
            slots[0] = Some(mv.clone());
        }

        if let Some((from, to)) = squares(mv) {
            let bonus = i32::try_from(depth * depth).unwrap_or(i32::MAX);
            let entry = &mut self.history[from][to];
            *entry = entry.saturating_add(bonus);
            if *entry > HISTORY_LIMIT {
                self.age_history();
            }
        }
    }

    fn age_history(&mut self) {
        for row in self.history.iter_mut() {
            for score in row.iter_mut() {
                *score /= 2;
            }
        }
    }

    fn history_score(&self, mv: &Move) -> i32 {
        squares(mv).map_or(0, |(from, to)| self.history[from][to])
    }

    /// Killer and history bonus for a quiet move searched at `ply`
    fn bonus(&self, mv: &Move, ply: u32) -> i32 {
        if !is_quiet(mv) {
            return 0;
        }
        let killer = match self.killers.get(ply as usize) {
            Some([Some(first), _]) if first == mv => KILLER_PRIMARY_BONUS,
            Some([_, Some(second)]) if second == mv => KILLER_SECONDARY_BONUS,
            _ => 0,
        };
        killer + self.history_score(mv)
    }
}

fn squares(mv: &Move) -> Option<(usize, usize)> {
    mv.from().map(|from| (usize::from(from), usize::from(mv.to())))
}

/// Sort `moves` best-first. The sort is stable, so moves with equal keys
/// keep the rules library's enumeration order.
pub(crate) fn order_moves(
    moves: &mut [Move],
    tt_move: Option<&Move>,
    tables: &OrderingTables,
    ply: u32,
) {
    moves.sort_by_key(|mv| {
        let key = if Some(mv) == tt_move {
            i32::MAX
        } else {
            move_score(mv) + tables.bonus(mv, ply)
        };
        std::cmp::Reverse(key)
    });
}
