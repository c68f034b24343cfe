//! # Core types shared by the evaluator, the search and the learning store
//!
//! ## Position identity
//!
//! Every cache in the engine is keyed by [`PositionId`], a canonical string
//! produced by [`crate::rules::position_id`]. It encodes piece placement, side
//! to move, castling rights and the en-passant square, but not the move
//! counters, so two move orders reaching the same board share one identity
//! (a transposition) and one learned value.
//!
//! ## Game results
//!
//! [`GameResult`] is what the surrounding game loop reports when a game ends.
//! Decisive and drawn games come straight from the rules collaborator's
//! [`Outcome`]; games cut short by a move cap are adjudicated on material.

use serde::{Deserialize, Serialize};
use shakmaty::{Color, Outcome};
use std::borrow::Borrow;
use std::fmt;

/// Centipawn score, positive values favour white
pub type Score = i32;

/// Canonical identity of a board state
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionId(String);

impl PositionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PositionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for PositionId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl Borrow<str> for PositionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// How a cached score relates to the true minimax value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The score is the exact minimax value
    Exact,
    /// The true value is at least the score (fail-high)
    Lower,
    /// The true value is at most the score (fail-low)
    Upper,
}

/// Final result of a game as reported by the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// Checkmate (or resignation) with a winner
    Decisive { winner: Color },
    /// Stalemate, insufficient material, fifty-move rule or agreement
    Draw,
    /// Game stopped before a natural end; `material` is the white-relative
    /// material balance of the final position in centipawns
    Adjudicated { material: Score },
}

impl GameResult {
    /// PGN-style result tag
    pub fn pgn(&self) -> &'static str {
        match self {
            GameResult::Decisive {
                winner: Color::White,
            } => "1-0",
            GameResult::Decisive {
                winner: Color::Black,
            } => "0-1",
            GameResult::Draw => "1/2-1/2",
            GameResult::Adjudicated { .. } => "*",
        }
    }
}

impl From<Outcome> for GameResult {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Decisive { winner } => GameResult::Decisive { winner },
            Outcome::Draw => GameResult::Draw,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Adjudicated { material } => write!(f, "* (material {material:+})"),
            other => f.write_str(other.pgn()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_result_pgn_tags() {
        assert_eq!(
            GameResult::Decisive {
                winner: Color::White
            }
            .pgn(),
            "1-0"
        );
        assert_eq!(
            GameResult::Decisive {
                winner: Color::Black
            }
            .pgn(),
            "0-1"
        );
        assert_eq!(GameResult::Draw.pgn(), "1/2-1/2");
        assert_eq!(GameResult::Adjudicated { material: 400 }.pgn(), "*");
    }

    #[test]
    fn test_game_result_from_outcome() {
        assert_eq!(GameResult::from(Outcome::Draw), GameResult::Draw);
        assert_eq!(
            GameResult::from(Outcome::Decisive {
                winner: Color::Black
            }),
            GameResult::Decisive {
                winner: Color::Black
            }
        );
    }

    #[test]
    fn test_position_id_borrows_as_str() {
        let id = PositionId::from("8/8/8/8/8/8/8/K6k w - -");
        let as_str: &str = id.borrow();
        assert_eq!(as_str, id.as_str());
        assert!(!id.is_empty());
        assert!(PositionId::new("").is_empty());
    }
}
