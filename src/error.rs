//! Error types for tictacnet
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using TicTacError
pub type Result<T> = std::result::Result<T, TicTacError>;

/// Unified error type for tictacnet operations
#[derive(Debug, Error)]
pub enum TicTacError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    #[error("Network error: {0}")]
    Network(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
