//! Self-play trainer for the XFChess learning engine
//!
//! Two engines, one per side, play each other from the starting position.
//! Each keeps its own learning store, so both improve from the same games.

pub mod cli;
pub mod trainer;

pub use trainer::{GameReport, SelfPlay, TrainingTally};
