//! Piece-square tables
//!
//! Small positional bonuses, indexed a1 = 0 .. h8 = 63 from white's side.
//! Black pieces read the vertically mirrored square. Every entry stays well
//! below a pawn so material always dominates.

use crate::types::Score;
use shakmaty::{Color, Piece, Role, Square};

#[rustfmt::skip]
const PAWN_PST: [Score; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    10, 10, 25, 25, 25, 25, 10, 10,
    20, 20, 35, 35, 35, 35, 20, 20,
    30, 30, 45, 45, 45, 45, 30, 30,
    40, 40, 55, 55, 55, 55, 40, 40,
    50, 50, 65, 65, 65, 65, 50, 50,
    60, 60, 75, 75, 75, 75, 60, 60,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_PST: [Score; 64] = [
   -30,-20,-10,-10,-10,-10,-20,-30,
   -20,  0,  5,  5,  5,  5,  0,-20,
   -10,  5, 10, 15, 15, 10,  5,-10,
   -10,  5, 15, 20, 20, 15,  5,-10,
   -10,  5, 15, 20, 20, 15,  5,-10,
   -10,  5, 10, 15, 15, 10,  5,-10,
   -20,  0,  5,  5,  5,  5,  0,-20,
   -30,-20,-10,-10,-10,-10,-20,-30,
];

#[rustfmt::skip]
const BISHOP_PST: [Score; 64] = [
   -10, -5, -5, -5, -5, -5, -5,-10,
    -5,  5,  0,  0,  0,  0,  5, -5,
    -5,  5, 10, 10, 10, 10,  5, -5,
    -5,  0, 10, 15, 15, 10,  0, -5,
    -5,  0, 10, 15, 15, 10,  0, -5,
    -5,  5, 10, 10, 10, 10,  5, -5,
    -5,  5,  0,  0,  0,  0,  5, -5,
   -10, -5, -5, -5, -5, -5, -5,-10,
];

#[rustfmt::skip]
const QUEEN_PST: [Score; 64] = [
   -10, -5, -5,  0,  0, -5, -5,-10,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  5,  5,  5,  5,  0, -5,
     0,  0,  5, 10, 10,  5,  0,  0,
     0,  0,  5, 10, 10,  5,  0,  0,
    -5,  0,  5,  5,  5,  5,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
   -10, -5, -5,  0,  0, -5, -5,-10,
];

/// Positional bonus for `piece` on `square`, signed from white's view
pub fn pst_value(piece: Piece, square: Square) -> Score {
    let relative = match piece.color {
        Color::White => square,
        Color::Black => square.flip_vertical(),
    };
    let index = usize::from(relative);

    let value = match piece.role {
        Role::Pawn => PAWN_PST[index],
        Role::Knight => KNIGHT_PST[index],
        Role::Bishop => BISHOP_PST[index],
        Role::Queen => QUEEN_PST[index],
        Role::Rook | Role::King => 0,
    };

    match piece.color {
        Color::White => value,
        Color::Black => -value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_mirrored_between_colors() {
        let white = Piece {
            color: Color::White,
            role: Role::Knight,
        };
        let black = Piece {
            color: Color::Black,
            role: Role::Knight,
        };
        assert_eq!(
            pst_value(white, Square::D4),
            -pst_value(black, Square::D5)
        );
    }

    #[test]
    fn test_central_knight_beats_rim_knight() {
        let knight = Piece {
            color: Color::White,
            role: Role::Knight,
        };
        assert!(pst_value(knight, Square::E4) > pst_value(knight, Square::A4));
    }

    #[test]
    fn test_advanced_pawn_scores_higher() {
        let pawn = Piece {
            color: Color::White,
            role: Role::Pawn,
        };
        assert!(pst_value(pawn, Square::E6) > pst_value(pawn, Square::E3));
    }

    #[test]
    fn test_bonuses_stay_below_a_pawn() {
        for table in [PAWN_PST, KNIGHT_PST, BISHOP_PST, QUEEN_PST] {
            assert!(table.iter().all(|v| v.abs() < crate::constants::PAWN_VALUE));
        }
    }
}
