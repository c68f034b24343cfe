//! Position evaluation
//!
//! Scores positions from white's point of view using:
//! - Material count (piece values)
//! - Positional bonuses (piece-square tables)
//! - Learned values from the [`LearningStore`], blended in once the store has
//!   experience
//!
//! ## Module Organization
//!
//! - `material` - Material balance evaluation
//! - `pst` - Piece-square tables for positional evaluation
//! - `position` - Static evaluation (material + positional)
//! - `learned` - Blend weight and blending of learned values

mod learned;
mod material;
mod position;
mod pst;

pub use learned::{blend, learned_weight};
pub use material::{material_balance, piece_value};
pub use position::evaluate_static;

use crate::learning::LearningStore;
use crate::rules::position_id;
use crate::types::{PositionId, Score};
use shakmaty::{Chess, Color};

/// Full evaluation of `pos`, white-relative
pub fn evaluate(pos: &Chess, store: &LearningStore) -> Score {
    evaluate_identified(pos, &position_id(pos), store)
}

/// Same as [`evaluate`] when the caller already computed the identity
pub fn evaluate_identified(pos: &Chess, id: &PositionId, store: &LearningStore) -> Score {
    let heuristic = evaluate_static(pos);

    if !store.is_enabled() {
        return heuristic;
    }

    match store.learned_value(id) {
        Some(value) => {
            // stored values are from the owner's side
            let white_value = match store.side() {
                Color::White => value,
                Color::Black => -value,
            };
            blend(heuristic, white_value, store.learned_weight())
        }
        None => heuristic,
    }
}
