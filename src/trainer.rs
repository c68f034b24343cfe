//! Self-play game loop
//!
//! Plays complete games between a white and a black [`Engine`], reports each
//! finished game to both, and adjudicates games that hit the ply cap on
//! material.

use anyhow::{Context, Result};
use learning_engine::evaluation::material_balance;
use learning_engine::{rules, Engine, GameResult, GameSummary};
use shakmaty::{Color, Position};
use std::fmt;
use tracing::{error, info};

/// One finished self-play game
#[derive(Debug, Clone)]
pub struct GameReport {
    pub result: GameResult,
    pub plies: u32,
    pub white: GameSummary,
    pub black: GameSummary,
}

/// Running totals over a training session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrainingTally {
    pub games: u64,
    pub white_wins: u64,
    pub black_wins: u64,
    pub draws: u64,
    pub adjudicated: u64,
    pub plies: u64,
}

impl TrainingTally {
    pub fn record(&mut self, report: &GameReport) {
        self.games += 1;
        self.plies += u64::from(report.plies);
        match report.result {
            GameResult::Decisive {
                winner: Color::White,
            } => self.white_wins += 1,
            GameResult::Decisive {
                winner: Color::Black,
            } => self.black_wins += 1,
            GameResult::Draw => self.draws += 1,
            GameResult::Adjudicated { .. } => self.adjudicated += 1,
        }
    }

    pub fn average_plies(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.plies as f64 / self.games as f64
        }
    }
}

impl fmt::Display for TrainingTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} games: white {} black {} draws {} adjudicated {}, {:.1} plies/game",
            self.games,
            self.white_wins,
            self.black_wins,
            self.draws,
            self.adjudicated,
            self.average_plies()
        )
    }
}

pub struct SelfPlay {
    white: Engine,
    black: Engine,
    max_plies: u32,
}

impl SelfPlay {
    pub fn new(white: Engine, black: Engine, max_plies: u32) -> Self {
        Self {
            white,
            black,
            max_plies,
        }
    }

    pub fn white(&self) -> &Engine {
        &self.white
    }

    pub fn black(&self) -> &Engine {
        &self.black
    }

    /// Play one game from the starting position and let both engines learn.
    /// A game that fails part way is abandoned by both engines.
    pub fn play_game(&mut self) -> Result<GameReport> {
        let (result, plies) = match self.play_out() {
            Ok(finished) => finished,
            Err(e) => {
                self.abandon();
                return Err(e);
            }
        };

        let white = self.white.end_game(result);
        let black = self.black.end_game(result);

        Ok(GameReport {
            result,
            plies,
            white,
            black,
        })
    }

    /// Forget the plies of an unfinished game on both sides
    fn abandon(&mut self) {
        self.white.abandon_game();
        self.black.abandon_game();
    }

    fn play_out(&mut self) -> Result<(GameResult, u32)> {
        let mut pos = rules::start_position();
        let mut plies = 0u32;

        loop {
            if let Some(outcome) = rules::outcome(&pos) {
                return Ok((GameResult::from(outcome), plies));
            }
            if plies >= self.max_plies {
                let material = material_balance(&pos);
                return Ok((GameResult::Adjudicated { material }, plies));
            }

            let mover = match pos.turn() {
                Color::White => &mut self.white,
                Color::Black => &mut self.black,
            };
            let mv = mover
                .choose_move(&pos)
                .with_context(|| format!("choosing move {} of the game", plies + 1))?;
            pos = rules::apply(&pos, &mv)?;
            plies += 1;
        }
    }

    /// Play `games` games, logging progress every `report_every` games
    pub fn run(&mut self, games: u64, report_every: u64) -> Result<TrainingTally> {
        let mut tally = TrainingTally::default();

        for game in 1..=games {
            let report = self.play_game()?;
            tally.record(&report);
            info!(
                "[TRAINER] Game {}/{}: {} after {} plies",
                game, games, report.result, report.plies
            );

            if report_every > 0 && game % report_every == 0 {
                info!("[TRAINER] {}", tally);
                info!("[TRAINER] {}", self.white.stats());
                info!("[TRAINER] {}", self.black.stats());
            }
        }

        Ok(tally)
    }

    /// Save both stores. Both saves are attempted; the first failure is
    /// returned.
    pub fn shutdown(self) -> Result<()> {
        let white = self.white.shutdown().context("saving white store");
        let black = self.black.shutdown().context("saving black store");

        let mut first_error = None;
        for saved in [white, black] {
            match saved {
                Ok(Some(path)) => info!("[TRAINER] Store written to {:?}", path),
                Ok(None) => {}
                Err(e) => {
                    error!("[TRAINER] {:#}", e);
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(result: GameResult, plies: u32) -> GameReport {
        let summary = GameSummary {
            result,
            reward: 0.0,
            plies: 0,
            games_played: 1,
            epsilon: 0.3,
            save: learning_engine::SaveOutcome::NotDue,
        };
        GameReport {
            result,
            plies,
            white: summary.clone(),
            black: summary,
        }
    }

    #[test]
    fn test_tally_counts_results() {
        let mut tally = TrainingTally::default();
        tally.record(&report(
            GameResult::Decisive {
                winner: Color::Black,
            },
            40,
        ));
        tally.record(&report(GameResult::Draw, 60));
        tally.record(&report(GameResult::Adjudicated { material: 0 }, 150));

        assert_eq!(tally.games, 3);
        assert_eq!(tally.black_wins, 1);
        assert_eq!(tally.draws, 1);
        assert_eq!(tally.adjudicated, 1);
        assert!((tally.average_plies() - 250.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_abandoned_plies_are_not_learned() {
        let config = learning_engine::EngineConfig {
            search: learning_engine::SearchConfig {
                depth: 1,
                ..Default::default()
            },
            seed: Some(3),
            ..Default::default()
        };
        let white = Engine::in_memory(Color::White, config.clone()).unwrap();
        let black = Engine::in_memory(Color::Black, config).unwrap();
        let mut session = SelfPlay::new(white, black, 4);

        let start = rules::start_position();
        session.white.choose_move(&start).unwrap();
        assert_eq!(session.white.store().current_game().len(), 1);

        session.abandon();
        assert!(session.white.store().current_game().is_empty());

        let report = session.play_game().unwrap();
        let plies = report.plies as usize;
        assert_eq!(report.white.plies, (plies + 1) / 2);
        assert_eq!(report.black.plies, plies / 2);
    }
}
