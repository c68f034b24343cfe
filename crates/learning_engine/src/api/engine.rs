//! Engine handle
//!
//! [`Engine`] owns one side's learning store, the transposition table and the
//! exploration RNG. The surrounding game loop asks it for moves with
//! [`Engine::choose_move`] and reports every finished game exactly once with
//! [`Engine::end_game`].

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::learning::{GameSummary, LearningStats, LearningStore};
use crate::rules::position_id;
use crate::search::{SearchStats, TranspositionTable};
use crate::types::GameResult;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shakmaty::{Chess, Color};
use std::path::PathBuf;
use tracing::info;

pub struct Engine {
    pub(super) config: EngineConfig,
    pub(super) store: LearningStore,
    pub(super) transpositions: TranspositionTable,
    pub(super) rng: StdRng,
    pub(super) last_search: Option<SearchStats>,
}

impl Engine {
    /// Build an engine around an existing store.
    ///
    /// The store is reconfigured with `config.learning`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngineError::InvalidConfig`] when `config` fails
    /// validation.
    pub fn new(config: EngineConfig, mut store: LearningStore) -> EngineResult<Self> {
        config.validate()?;
        store.reconfigure(config.learning.clone());

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        info!(
            "[ENGINE] {:?} engine ready: depth {}, learning {}, epsilon {:.3}",
            store.side(),
            config.search.depth,
            if store.is_enabled() { "on" } else { "off" },
            store.epsilon()
        );

        Ok(Self {
            transpositions: TranspositionTable::new(config.search.transposition_capacity),
            config,
            store,
            rng,
            last_search: None,
        })
    }

    /// Engine backed by the store file at `path`
    pub fn open(side: Color, config: EngineConfig, path: impl Into<PathBuf>) -> EngineResult<Self> {
        let store = LearningStore::open(side, config.learning.clone(), path);
        Self::new(config, store)
    }

    /// Engine with a fresh store that is never written to disk
    pub fn in_memory(side: Color, config: EngineConfig) -> EngineResult<Self> {
        let store = LearningStore::new(side, config.learning.clone());
        Self::new(config, store)
    }

    pub fn side(&self) -> Color {
        self.store.side()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &LearningStore {
        &self.store
    }

    /// Counters of the most recent tree search, if any
    pub fn last_search_stats(&self) -> Option<SearchStats> {
        self.last_search
    }

    pub fn transposition_len(&self) -> usize {
        self.transpositions.len()
    }

    /// Record a position for a move this engine did not choose.
    ///
    /// [`Engine::choose_move`] already records the positions it plays from.
    pub fn record_ply(&mut self, pos: &Chess) {
        self.store.record_ply(position_id(pos));
    }

    /// Learn from a finished game. Call exactly once per game.
    pub fn end_game(&mut self, result: GameResult) -> GameSummary {
        self.transpositions.clear();
        let summary = self.store.end_game(result);
        info!(
            "[ENGINE] {:?} finished game {}: {} reward {:+} epsilon {:.3}",
            self.store.side(),
            summary.games_played,
            summary.result,
            summary.reward,
            summary.epsilon
        );
        summary
    }

    /// Drop the plies of an unfinished game without learning from them
    pub fn abandon_game(&mut self) {
        self.transpositions.clear();
        self.store.start_new_game();
    }

    /// Write the store now, regardless of the save cadence
    pub fn save(&mut self) -> EngineResult<Option<PathBuf>> {
        self.store.save()
    }

    /// Final save before the engine is dropped
    pub fn shutdown(mut self) -> EngineResult<Option<PathBuf>> {
        info!("[ENGINE] {:?} engine shutting down", self.store.side());
        self.store.save()
    }

    pub fn stats(&self) -> LearningStats {
        self.store.stats()
    }
}
