//! Command definitions
//!
//! Represents lines sent by players.

/// A parsed player command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Claim the cell at (row, col)
    ///
    /// Coordinates are kept signed and unchecked here; range is a game
    /// rule, not a syntax rule.
    Move { row: i64, col: i64 },
}

impl Command {
    /// Keyword that starts the line
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::Move { .. } => "MOVE",
        }
    }
}
