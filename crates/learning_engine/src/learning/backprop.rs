//! Reward mapping and temporal-difference backpropagation

use crate::cache::LruCache;
use crate::constants::*;
use crate::types::{GameResult, PositionId};
use shakmaty::Color;

/// Reward for `result` seen from `side`
pub fn reward_for(result: GameResult, side: Color) -> f64 {
    match result {
        GameResult::Decisive { winner } if winner == side => WIN_REWARD,
        GameResult::Decisive { .. } => LOSS_REWARD,
        GameResult::Draw => DRAW_REWARD,
        GameResult::Adjudicated { material } => {
            let own = match side {
                Color::White => material,
                Color::Black => -material,
            };
            if own > ADJUDICATION_MARGIN {
                ADJUDICATED_REWARD
            } else if own < -ADJUDICATION_MARGIN {
                -ADJUDICATED_REWARD
            } else {
                DRAW_REWARD
            }
        }
    }
}

/// Move every position of a finished game toward the discounted reward.
///
/// Walks from the final position backwards; the position `i` plies before
/// the end targets `reward * discount^i` and moves by `learning_rate` of the
/// gap. With `learning_rate` in (0, 1] the new value lies between the old
/// value and the target, so values never leave the reward range.
pub(crate) fn backpropagate(
    values: &mut LruCache<PositionId, f64>,
    positions: &[PositionId],
    reward: f64,
    learning_rate: f64,
    discount: f64,
) {
    let mut target = reward;

    for id in positions.iter().rev() {
        let current = values.peek(id).copied().unwrap_or(0.0);
        let updated = current + learning_rate * (target - current);
        values.insert(
            id.clone(),
            updated.clamp(-MAX_LEARNED_VALUE, MAX_LEARNED_VALUE),
        );
        target *= discount;
    }
}
