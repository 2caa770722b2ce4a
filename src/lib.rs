//! # tictacnet
//!
//! A networked two-player tic-tac-toe server with:
//! - A line-oriented text protocol over TCP
//! - One independent session (board, turn, channels) per pair of players
//! - Strict turn order, move validation and win/draw detection
//! - A thin text client for playing from a terminal
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TCP Server                              │
//! │            (pairs connections: first X, then O)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ one thread per pair
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                Session Coordinator                           │
//! │     (roles, broadcasts, YOUR_MOVE / OK / INVALID loop)       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ Participant │          │    Game     │
//!   │  Channels   │          │ (board and  │
//!   │  (X and O)  │          │   turn)     │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod game;
pub mod protocol;
pub mod network;
pub mod session;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{TicTacError, Result};
pub use config::Config;
pub use game::{Board, Cell, Game, Outcome, Role};
pub use session::{run_session, Session, SessionState};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of tictacnet
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Port both the server and the client use unless told otherwise
pub const DEFAULT_PORT: u16 = 5000;
