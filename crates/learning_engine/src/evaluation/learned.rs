//! Learned-value blending
//!
//! The weight given to experience grows linearly with the number of finished
//! games and saturates at `max_weight`, which is kept below 1 so the static
//! heuristic always contributes.

use crate::types::Score;

/// Blend weight after `games_played` finished games.
///
/// Non-decreasing in `games_played` and never above `max_weight`.
pub fn learned_weight(games_played: u64, max_weight: f64, weight_per_game: f64) -> f64 {
    (games_played as f64 * weight_per_game).min(max_weight).max(0.0)
}

/// `heuristic * (1 - w) + learned * w`, rounded to centipawns
pub fn blend(heuristic: Score, learned: f64, weight: f64) -> Score {
    let mixed = f64::from(heuristic) * (1.0 - weight) + learned * weight;
    mixed.round() as Score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_starts_at_zero() {
        assert_eq!(learned_weight(0, 0.4, 0.002), 0.0);
    }

    #[test]
    fn test_weight_grows_then_caps() {
        assert!((learned_weight(100, 0.4, 0.002) - 0.2).abs() < 1e-12);
        assert_eq!(learned_weight(200, 0.4, 0.002), 0.4);
        assert_eq!(learned_weight(1_000_000, 0.4, 0.002), 0.4);
    }

    #[test]
    fn test_blend_extremes() {
        assert_eq!(blend(120, 900.0, 0.0), 120);
        assert_eq!(blend(100, 500.0, 0.5), 300);
        assert_eq!(blend(-200, -1000.0, 0.4), -520);
    }
}
