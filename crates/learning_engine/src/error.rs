//! Error types for the learning engine
//!
//! Covers search preconditions, move application, configuration validation
//! and learning store persistence.

use thiserror::Error;

/// Errors that can occur in the learning engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// Search or move selection was invoked on a finished game
    #[error("Position is already terminal: {position}")]
    TerminalPosition { position: String },

    /// Move selection was invoked on a position without legal moves
    #[error("No legal moves available in position {position}")]
    NoLegalMoves { position: String },

    /// A move could not be applied to the given position
    #[error("Illegal move {mv} in position {position}")]
    IllegalMove { mv: String, position: String },

    /// A FEN string could not be parsed into a playable position
    #[error("Invalid position {fen}: {message}")]
    InvalidPosition { fen: String, message: String },

    /// Configuration value out of range
    #[error("Invalid configuration: {field} {message}")]
    InvalidConfig {
        field: &'static str,
        message: String,
    },

    /// Learning store file I/O error
    #[error("Learning store I/O error: {0}")]
    StoreIo(#[from] std::io::Error),

    /// Learning store serialization/deserialization error
    #[error("Learning store serialization error: {0}")]
    StoreSerialization(#[from] serde_json::Error),

    /// Search finished without producing a move for a non-terminal root
    #[error("Search produced no move at depth {depth}")]
    BestMoveNotSet { depth: u32 },
}

/// Result type alias for learning engine operations
pub type EngineResult<T> = Result<T, EngineError>;
