//! Material evaluation
//!
//! Evaluates the material balance of a position by counting piece values.

use crate::constants::*;
use crate::types::Score;
use shakmaty::{Board, Chess, Color, Position, Role};

/// Centipawn value of a piece kind
pub fn piece_value(role: Role) -> Score {
    match role {
        Role::Pawn => PAWN_VALUE,
        Role::Knight => KNIGHT_VALUE,
        Role::Bishop => BISHOP_VALUE,
        Role::Rook => ROOK_VALUE,
        Role::Queen => QUEEN_VALUE,
        Role::King => KING_VALUE,
    }
}

/// Material balance from white's point of view
pub fn material_balance(pos: &Chess) -> Score {
    board_material(pos.board())
}

pub(crate) fn board_material(board: &Board) -> Score {
    let mut score = 0;

    for square in board.occupied() {
        if let Some(piece) = board.piece_at(square) {
            let value = piece_value(piece.role);
            score += match piece.color {
                Color::White => value,
                Color::Black => -value,
            };
        }
    }

    score
}
