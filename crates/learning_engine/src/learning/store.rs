//! Learning store
//!
//! Owns the learned position values of one side, the plies of the game in
//! progress and the rolling log of finished games. Values are stored from the
//! owner's point of view: positive means good for `side`.
//!
//! # Persistence
//!
//! The store is loaded once at construction and written every
//! `save_interval` finished games, on [`LearningStore::save`] and when the
//! owning engine shuts down. Loading never fails: a missing file starts a
//! fresh store, a corrupt one is reported and replaced by defaults.
//!
//! # Disabled learning
//!
//! With `enabled = false` the store is read-only. Plies are not recorded,
//! finished games change nothing and nothing is written to disk.

use super::backprop::{backpropagate, reward_for};
use super::snapshot::{self, GameRecord, LearningSnapshot};
use super::stats::LearningStats;
use crate::cache::LruCache;
use crate::config::LearningConfig;
use crate::constants::MAX_LEARNED_VALUE;
use crate::error::EngineResult;
use crate::evaluation::learned_weight;
use crate::types::{GameResult, PositionId};
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use indexmap::IndexMap;
use shakmaty::Color;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// What happened to the durable copy after a finished game
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The cadence did not call for a save
    NotDue,
    Saved(PathBuf),
    /// Due, but the store has no backing file
    InMemory,
    /// Due, but writing failed; the in-memory store is still valid
    Failed(String),
    /// Learning is disabled, nothing was recorded
    Disabled,
}

/// Report returned by [`LearningStore::end_game`]
#[derive(Debug, Clone, PartialEq)]
pub struct GameSummary {
    pub result: GameResult,
    /// Reward from the store owner's side
    pub reward: f64,
    /// Number of positions the reward was propagated into
    pub plies: usize,
    pub games_played: u64,
    pub epsilon: f64,
    pub save: SaveOutcome,
}

fn side_name(side: Color) -> &'static str {
    match side {
        Color::White => "white",
        Color::Black => "black",
    }
}

/// Store file name for a side, e.g. `learning_white.json`
/// The store keeps working with a bad config: a zero save interval only
/// disables the periodic save.
fn warn_if_invalid(config: &LearningConfig) {
    if let Err(e) = config.validate() {
        warn!("[LEARNING] {}", e);
    }
}

pub fn store_file_name(side: Color) -> String {
    format!("learning_{}.json", side_name(side))
}

/// Default store location in the user's data directory
pub fn default_store_path(side: Color) -> PathBuf {
    let file_name = store_file_name(side);
    if let Some(proj_dirs) = ProjectDirs::from("com", "trilltino", "XFChess") {
        proj_dirs.data_dir().join(file_name)
    } else {
        PathBuf::from(file_name)
    }
}

/// Learned values and game history for one side
#[derive(Debug, Clone)]
pub struct LearningStore {
    side: Color,
    config: LearningConfig,
    values: LruCache<PositionId, f64>,
    history: VecDeque<GameRecord>,
    current: Vec<PositionId>,
    games_played: u64,
    wins: u64,
    draws: u64,
    losses: u64,
    epsilon: f64,
    last_updated: Option<DateTime<Utc>>,
    path: Option<PathBuf>,
}

impl LearningStore {
    /// Fresh in-memory store with no backing file
    pub fn new(side: Color, config: LearningConfig) -> Self {
        warn_if_invalid(&config);
        Self {
            side,
            values: LruCache::new(config.max_positions),
            history: VecDeque::new(),
            current: Vec::new(),
            games_played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            epsilon: config.initial_epsilon,
            last_updated: None,
            path: None,
            config,
        }
    }

    /// Load the store backed by `path`, falling back to a fresh store
    pub fn open(side: Color, config: LearningConfig, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut store = Self::new(side, config);
        store.path = Some(path.clone());

        match snapshot::read(&path) {
            Ok(Some(snapshot)) => {
                store.restore(snapshot);
                info!(
                    "[LEARNING] Loaded {} store from {:?}: {} games, {} positions, epsilon {:.3}",
                    side_name(side),
                    path,
                    store.games_played,
                    store.values.len(),
                    store.epsilon
                );
            }
            Ok(None) => {
                info!(
                    "[LEARNING] No store found at {:?}. Starting fresh.",
                    path
                );
            }
            Err(e) => {
                warn!(
                    "[LEARNING] Failed to load store at {:?}: {}. Starting fresh.",
                    path, e
                );
            }
        }

        store
    }

    fn restore(&mut self, snapshot: LearningSnapshot) {
        if let Some(saved_side) = snapshot.side.as_deref() {
            if saved_side != side_name(self.side) {
                warn!(
                    "[LEARNING] Store was written for {} but is loaded for {}",
                    saved_side,
                    side_name(self.side)
                );
            }
        }

        let mut skipped = 0usize;
        for (id, value) in snapshot.position_values {
            if id.is_empty() || !value.is_finite() {
                skipped += 1;
                continue;
            }
            self.values.insert(
                PositionId::new(id),
                value.clamp(-MAX_LEARNED_VALUE, MAX_LEARNED_VALUE),
            );
        }
        if skipped > 0 {
            warn!("[LEARNING] Ignored {} invalid stored values", skipped);
        }

        let keep_from = snapshot
            .move_history
            .len()
            .saturating_sub(self.config.history_capacity);
        self.history = snapshot.move_history.into_iter().skip(keep_from).collect();
        self.drop_orphaned_records();

        self.games_played = snapshot.games_played;
        self.wins = snapshot.wins;
        self.draws = snapshot.draws;
        self.losses = snapshot.losses;
        self.epsilon = match snapshot.epsilon {
            Some(epsilon) if epsilon.is_finite() => epsilon,
            _ => self.recovered_epsilon(),
        }
        .clamp(self.config.epsilon_floor, 1.0);
        self.last_updated = snapshot.last_updated;
    }

    /// ε after `games_played` decays from the initial value
    fn recovered_epsilon(&self) -> f64 {
        let exponent = i32::try_from(self.games_played).unwrap_or(i32::MAX);
        (self.config.initial_epsilon * self.config.epsilon_decay.powi(exponent))
            .max(self.config.epsilon_floor)
    }

    pub fn side(&self) -> Color {
        self.side
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn config(&self) -> &LearningConfig {
        &self.config
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Learned value from the owner's side, 0 for unseen positions
    pub fn value_of(&self, id: &PositionId) -> f64 {
        self.learned_value(id).unwrap_or(0.0)
    }

    /// Learned value if the position has been seen in a finished game
    pub fn learned_value(&self, id: &PositionId) -> Option<f64> {
        self.values.peek(id).copied()
    }

    /// Current blend weight given to learned values
    pub fn learned_weight(&self) -> f64 {
        learned_weight(
            self.games_played,
            self.config.max_weight,
            self.config.weight_per_game,
        )
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Restore ε to its configured initial value
    pub fn reset_epsilon(&mut self) {
        self.epsilon = self.config.initial_epsilon;
    }

    pub fn games_played(&self) -> u64 {
        self.games_played
    }

    pub fn positions_learned(&self) -> usize {
        self.values.len()
    }

    /// Positions recorded so far in the game in progress
    pub fn current_game(&self) -> &[PositionId] {
        &self.current
    }

    /// Finished games, oldest first
    pub fn history(&self) -> impl Iterator<Item = &GameRecord> + '_ {
        self.history.iter()
    }

    /// Append a position to the game in progress
    pub fn record_ply(&mut self, id: PositionId) {
        if self.config.enabled {
            self.current.push(id);
        }
    }

    /// Discard the plies of an abandoned game without learning from them
    pub fn start_new_game(&mut self) {
        self.current.clear();
    }

    /// Learn from the finished game and archive it
    pub fn end_game(&mut self, result: GameResult) -> GameSummary {
        let reward = reward_for(result, self.side);

        if !self.config.enabled {
            return GameSummary {
                result,
                reward,
                plies: 0,
                games_played: self.games_played,
                epsilon: self.epsilon,
                save: SaveOutcome::Disabled,
            };
        }

        let positions = std::mem::take(&mut self.current);
        backpropagate(
            &mut self.values,
            &positions,
            reward,
            self.config.learning_rate,
            self.config.discount,
        );
        let plies = positions.len();

        self.history.push_back(GameRecord {
            positions,
            outcome: result.pgn().to_owned(),
            reward,
            finished_at: Some(Utc::now()),
        });
        while self.history.len() > self.config.history_capacity {
            self.history.pop_front();
        }
        self.drop_orphaned_records();

        self.games_played += 1;
        if reward > 0.0 {
            self.wins += 1;
        } else if reward < 0.0 {
            self.losses += 1;
        } else {
            self.draws += 1;
        }
        self.epsilon = (self.epsilon * self.config.epsilon_decay).max(self.config.epsilon_floor);

        debug!(
            "[LEARNING] {} game {} finished {} ({} plies, reward {:+})",
            side_name(self.side),
            self.games_played,
            result,
            plies,
            reward
        );

        let save_due = self.config.save_interval > 0
            && self.games_played % self.config.save_interval == 0;
        let save = if save_due {
            match self.save() {
                Ok(Some(path)) => SaveOutcome::Saved(path),
                Ok(None) => SaveOutcome::InMemory,
                Err(e) => {
                    error!("[LEARNING] Failed to save store: {}", e);
                    SaveOutcome::Failed(e.to_string())
                }
            }
        } else {
            SaveOutcome::NotDue
        };

        GameSummary {
            result,
            reward,
            plies,
            games_played: self.games_played,
            epsilon: self.epsilon,
            save,
        }
    }

    /// Records whose positions were evicted from the value table are dropped
    fn drop_orphaned_records(&mut self) {
        let values = &self.values;
        self.history
            .retain(|record| record.positions.iter().all(|id| values.contains_key(id)));
    }

    /// Apply new parameters, shrinking the tables if the bounds went down
    pub fn reconfigure(&mut self, config: LearningConfig) {
        warn_if_invalid(&config);
        self.values.set_capacity(config.max_positions);
        while self.history.len() > config.history_capacity {
            self.history.pop_front();
        }
        self.epsilon = self.epsilon.clamp(config.epsilon_floor, 1.0);
        self.config = config;
        self.drop_orphaned_records();
    }

    /// Serializable copy of the durable state
    pub fn snapshot(&self) -> LearningSnapshot {
        let mut position_values = IndexMap::with_capacity(self.values.len());
        let mut skipped = 0usize;
        for (id, value) in self.values.iter() {
            if id.is_empty() || !value.is_finite() {
                skipped += 1;
                continue;
            }
            position_values.insert(id.to_string(), *value);
        }
        if skipped > 0 {
            warn!("[LEARNING] Skipped {} unserializable values", skipped);
        }

        LearningSnapshot {
            side: Some(side_name(self.side).to_owned()),
            position_values,
            move_history: self.history.iter().cloned().collect(),
            games_played: self.games_played,
            wins: self.wins,
            draws: self.draws,
            losses: self.losses,
            epsilon: Some(self.epsilon),
            last_updated: self.last_updated,
        }
    }

    /// Write the store to its backing file.
    ///
    /// Returns the path written, or `None` for in-memory or disabled stores.
    pub fn save(&mut self) -> EngineResult<Option<PathBuf>> {
        if !self.config.enabled {
            return Ok(None);
        }
        let Some(path) = self.path.clone() else {
            return Ok(None);
        };

        self.last_updated = Some(Utc::now());
        snapshot::write(&path, &self.snapshot())?;
        info!(
            "[LEARNING] Saved {} store to {:?} ({} games, {} positions)",
            side_name(self.side),
            path,
            self.games_played,
            self.values.len()
        );
        Ok(Some(path))
    }

    pub fn stats(&self) -> LearningStats {
        LearningStats {
            side: self.side,
            games_played: self.games_played,
            positions_learned: self.values.len(),
            epsilon: self.epsilon,
            wins: self.wins,
            draws: self.draws,
            losses: self.losses,
            history_len: self.history.len(),
            last_updated: self.last_updated,
        }
    }
}
