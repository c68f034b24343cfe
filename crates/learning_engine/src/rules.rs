//! Narrow interface over the chess rules library
//!
//! The engine never inspects rules internals directly. Everything it needs
//! (legal move enumeration, move application, terminal detection and the
//! canonical position identity) goes through the functions in this module.

use crate::constants::FIFTY_MOVE_HALFMOVES;
use crate::error::{EngineError, EngineResult};
use crate::types::PositionId;
use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::{
    CastlingMode, CastlingSide, Chess, Color, EnPassantMode, Move, Outcome, Position, Square,
};

/// Standard starting position
pub fn start_position() -> Chess {
    Chess::default()
}

/// Parse a FEN string into a playable position
pub fn from_fen(fen: &str) -> EngineResult<Chess> {
    let parsed: Fen = fen.parse().map_err(|e| EngineError::InvalidPosition {
        fen: fen.to_owned(),
        message: format!("{e}"),
    })?;
    parsed
        .into_position(CastlingMode::Standard)
        .map_err(|e| EngineError::InvalidPosition {
            fen: fen.to_owned(),
            message: format!("{e}"),
        })
}

/// Legal moves in the rules library's deterministic enumeration order
pub fn legal_moves(pos: &Chess) -> Vec<Move> {
    pos.legal_moves().into_iter().collect()
}

/// Apply a move, rejecting anything that is not legal in `pos`
pub fn apply(pos: &Chess, mv: &Move) -> EngineResult<Chess> {
    if !pos.is_legal(mv) {
        return Err(EngineError::IllegalMove {
            mv: format!("{mv:?}"),
            position: position_id(pos).to_string(),
        });
    }
    Ok(apply_unchecked(pos, mv))
}

/// Apply a move taken from [`legal_moves`] of the same position
pub(crate) fn apply_unchecked(pos: &Chess, mv: &Move) -> Chess {
    let mut next = pos.clone();
    next.play_unchecked(mv);
    next
}

/// Game outcome, or `None` while the game is still running
///
/// Checkmate, stalemate and insufficient material come from the rules
/// library; the fifty-move rule is applied here as an automatic draw.
pub fn outcome(pos: &Chess) -> Option<Outcome> {
    pos.outcome().or_else(|| {
        if pos.halfmoves() >= FIFTY_MOVE_HALFMOVES {
            Some(Outcome::Draw)
        } else {
            None
        }
    })
}

pub fn is_terminal(pos: &Chess) -> bool {
    outcome(pos).is_some()
}

/// Canonical identity: placement, side to move, castling rights and the
/// en-passant square (only when a legal capture exists). Move counters are
/// left out so transpositions share an identity.
pub fn position_id(pos: &Chess) -> PositionId {
    let turn = match pos.turn() {
        Color::White => 'w',
        Color::Black => 'b',
    };

    let castles = pos.castles();
    let mut castling = String::with_capacity(4);
    for (color, side, symbol) in [
        (Color::White, CastlingSide::KingSide, 'K'),
        (Color::White, CastlingSide::QueenSide, 'Q'),
        (Color::Black, CastlingSide::KingSide, 'k'),
        (Color::Black, CastlingSide::QueenSide, 'q'),
    ] {
        if castles.has(color, side) {
            castling.push(symbol);
        }
    }
    if castling.is_empty() {
        castling.push('-');
    }

    let en_passant = pos
        .ep_square(EnPassantMode::Legal)
        .map_or_else(|| "-".to_owned(), |sq| sq.to_string());

    PositionId::new(format!("{} {turn} {castling} {en_passant}", placement(pos)))
}

/// Piece placement field of a FEN, rank 8 first
fn placement(pos: &Chess) -> String {
    let board = pos.board();
    let mut out = String::with_capacity(72);

    for rank in (0..8u32).rev() {
        let mut empty = 0u8;
        for file in 0..8u32 {
            match board.piece_at(Square::new(rank * 8 + file)) {
                Some(piece) => {
                    if empty > 0 {
                        out.push(char::from(b'0' + empty));
                        empty = 0;
                    }
                    out.push(piece.char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push(char::from(b'0' + empty));
        }
        if rank > 0 {
            out.push('/');
        }
    }

    out
}

/// Standard algebraic notation for logging
pub fn describe_move(pos: &Chess, mv: &Move) -> String {
    San::from_move(pos, mv).to_string()
}
