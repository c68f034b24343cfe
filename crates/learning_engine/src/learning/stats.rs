//! Read-only learning statistics for display

use chrono::{DateTime, Utc};
use shakmaty::Color;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct LearningStats {
    pub side: Color,
    pub games_played: u64,
    pub positions_learned: usize,
    pub epsilon: f64,
    pub wins: u64,
    pub draws: u64,
    pub losses: u64,
    pub history_len: usize,
    pub last_updated: Option<DateTime<Utc>>,
}

impl LearningStats {
    /// Fraction of finished games won, 0 before the first game
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.wins as f64 / self.games_played as f64
        }
    }
}

impl fmt::Display for LearningStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}: {} games (+{} ={} -{}, {:.1}% won), {} positions, epsilon {:.3}",
            self.side,
            self.games_played,
            self.wins,
            self.draws,
            self.losses,
            self.win_rate() * 100.0,
            self.positions_learned,
            self.epsilon
        )
    }
}
