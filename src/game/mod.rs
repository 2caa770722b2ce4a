//! Game Module
//!
//! The rules of tic-tac-toe, free of any I/O.
//!
//! ## Responsibilities
//! - Hold the 3×3 board and the active role
//! - Validate moves (range and occupancy)
//! - Detect wins over all 8 lines and draws on a full board
//!
//! ## Ownership
//! A `Game` belongs to exactly one session and is never shared.
//! Cells only ever go from `Empty` to `X` or `O`.

mod board;
mod state;

use std::fmt;

pub use board::{Board, Cell, Position, BOARD_SIZE};
pub use state::{AbortReason, Game, MoveError, Outcome};

/// One of the two player identities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// First to connect, always moves first
    X,

    /// Second to connect
    O,
}

impl Role {
    /// The other role
    pub fn opponent(self) -> Role {
        match self {
            Role::X => Role::O,
            Role::O => Role::X,
        }
    }

    /// Wire token for this role
    pub fn as_str(self) -> &'static str {
        match self {
            Role::X => "X",
            Role::O => "O",
        }
    }

    /// Parse a wire token (`X` or `O`, case-sensitive)
    pub fn from_token(token: &str) -> Option<Role> {
        match token {
            "X" => Some(Role::X),
            "O" => Some(Role::O),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
