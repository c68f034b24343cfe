//! # Engine constants
//!
//! Piece values in centipawns, search score bounds and the reward scale used
//! by the learning store.
//!
//! ## Score scale
//!
//! Static scores are centipawns from white's point of view. Mate scores sit
//! far outside any material total so the search never trades a forced mate
//! for material: a mate found `n` plies from the root scores
//! `MATE_SCORE - n`, which makes shorter mates strictly preferable.
//!
//! ## Reward scale
//!
//! Learned values live on the same numeric range as the terminal rewards
//! (±1000). The backpropagation update is a convex combination of the old
//! value and a discounted reward, so values can never leave that range.

use crate::types::Score;

pub const PAWN_VALUE: Score = 100;
pub const KNIGHT_VALUE: Score = 300;
pub const BISHOP_VALUE: Score = 300;
pub const ROOK_VALUE: Score = 500;
pub const QUEEN_VALUE: Score = 900;
/// Kings are never captured, so they carry no material weight
pub const KING_VALUE: Score = 0;

/// Score of a position where the side to move has been mated at the root
pub const MATE_SCORE: Score = 100_000;
/// Anything beyond this magnitude is a mate score
pub const MATE_THRESHOLD: Score = MATE_SCORE - 1_000;
/// Window bound for alpha-beta; larger than any reachable score
pub const SEARCH_INFINITY: Score = 1_000_000;

/// Reward for a decisive win from the store owner's side
pub const WIN_REWARD: f64 = 1000.0;
/// Reward for a decisive loss from the store owner's side
pub const LOSS_REWARD: f64 = -1000.0;
pub const DRAW_REWARD: f64 = 0.0;
/// Reward for a game stopped early and adjudicated on material
pub const ADJUDICATED_REWARD: f64 = 300.0;
/// Material lead (centipawns) required to adjudicate an unfinished game
pub const ADJUDICATION_MARGIN: Score = 150;
/// Learned values never exceed the reward magnitude
pub const MAX_LEARNED_VALUE: f64 = WIN_REWARD;

/// Halfmove clock value at which the fifty-move rule ends the game
pub const FIFTY_MOVE_HALFMOVES: u32 = 100;
