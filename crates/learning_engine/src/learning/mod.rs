//! Persistent learning from finished games
//!
//! ## Module Organization
//!
//! - `store` - The learning store owned by an engine
//! - `backprop` - Reward mapping and value updates
//! - `snapshot` - Durable document and atomic file writes
//! - `stats` - Read-only statistics

mod backprop;
mod snapshot;
mod stats;
mod store;

pub use backprop::reward_for;
pub use snapshot::{GameRecord, LearningSnapshot};
pub use stats::LearningStats;
pub use store::{default_store_path, store_file_name, GameSummary, LearningStore, SaveOutcome};
