//! Static position evaluation
//!
//! Material plus piece-square bonuses. No search, no learned values.

use super::material::board_material;
use super::pst::pst_value;
use crate::types::Score;
use shakmaty::{Chess, Position};

/// Heuristic score from white's point of view
pub fn evaluate_static(pos: &Chess) -> Score {
    let board = pos.board();
    let placement: Score = board
        .occupied()
        .into_iter()
        .filter_map(|square| board.piece_at(square).map(|piece| pst_value(piece, square)))
        .sum();

    board_material(board) + placement
}
