//! Public engine interface
//!
//! - `engine` - The [`Engine`] handle: construction, game lifecycle, saving
//! - `policy` - Epsilon-greedy move selection on top of the tree search

mod engine;
mod policy;

pub use engine::Engine;
