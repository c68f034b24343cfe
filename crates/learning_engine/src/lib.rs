//! # XFChess Learning Engine
//!
//! A chess move-selection engine that combines a depth-bounded alpha-beta
//! search with a persistent table of learned position values. After every
//! finished game the outcome is propagated back into the positions the
//! engine played from, so later searches are biased by experience.
//!
//! ## Architecture
//!
//! - `evaluation` - Static heuristic blended with learned values
//! - `search` - Alpha-beta minimax with an LRU transposition table
//! - `learning` - Learned values, game log, ε decay and persistence
//! - `api` - The [`Engine`] handle and its epsilon-greedy move policy
//! - `rules` - Narrow interface over the `shakmaty` rules library
//!
//! ## Example
//!
//! ```no_run
//! use learning_engine::{rules, Engine, EngineConfig, GameResult};
//! use shakmaty::Color;
//!
//! let mut engine = Engine::open(Color::White, EngineConfig::default(), "learning_white.json")?;
//! let start = rules::start_position();
//! let mv = engine.choose_move(&start)?;
//! let _next = rules::apply(&start, &mv)?;
//! // ... play the game out, then:
//! engine.end_game(GameResult::Draw);
//! engine.shutdown()?;
//! # Ok::<(), learning_engine::EngineError>(())
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod constants;
pub mod error;
pub mod evaluation;
pub mod learning;
pub mod rules;
pub mod search;
pub mod types;

pub use api::Engine;
pub use config::{default_config_path, EngineConfig, LearningConfig, SearchConfig};
pub use error::{EngineError, EngineResult};
pub use learning::{GameSummary, LearningStats, LearningStore, SaveOutcome};
pub use search::{SearchResult, SearchStats};
pub use types::{Bound, GameResult, PositionId, Score};

pub use shakmaty::{Chess, Color, Move, Outcome};
