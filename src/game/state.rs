//! Game state machine
//!
//! Turn order and outcome tracking on top of a `Board`.

use thiserror::Error;

use super::{Board, Position, Role};

/// Why a move was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("coordinates ({row}, {col}) are off the board")]
    OutOfRange { row: i64, col: i64 },

    #[error("cell ({row}, {col}) is already taken")]
    Occupied { row: usize, col: usize },

    #[error("the game is already over")]
    GameOver,
}

/// Why a session stopped before reaching a result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbortReason {
    /// The participant's stream reached end-of-stream
    Disconnected(Role),

    /// Reading from or writing to the participant failed
    Transport { role: Role, message: String },
}

impl AbortReason {
    /// The participant whose channel failed
    pub fn role(&self) -> Role {
        match self {
            AbortReason::Disconnected(role) => *role,
            AbortReason::Transport { role, .. } => *role,
        }
    }
}

/// Result of a game so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Win(Role),
    Draw,
    Aborted(AbortReason),
}

impl Outcome {
    /// `Win`, `Draw` and `Aborted` end the session
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// Board plus whose turn it is plus how it ended
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    turn: Role,
    outcome: Outcome,
    moves_played: usize,
}

impl Game {
    /// Empty board, X to move
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Role::X,
            outcome: Outcome::InProgress,
            moves_played: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The role allowed to move next
    pub fn turn(&self) -> Role {
        self.turn
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Play a move for the active role
    ///
    /// On success the cell is marked, the outcome is re-evaluated and, if
    /// the game goes on, the turn passes to the opponent. On failure
    /// nothing changes.
    pub fn play(&mut self, row: i64, col: i64) -> Result<Outcome, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }

        let pos = Position::try_new(row, col)?;
        let mover = self.turn;
        self.board.place(pos, mover)?;
        self.moves_played += 1;

        // Only the mover can have completed a line on this move
        self.outcome = if self.board.has_line(mover) {
            Outcome::Win(mover)
        } else if self.board.is_full() {
            Outcome::Draw
        } else {
            self.turn = mover.opponent();
            Outcome::InProgress
        };

        Ok(self.outcome.clone())
    }

    /// End the game without a result
    ///
    /// A game that already finished keeps its outcome.
    pub fn abort(&mut self, reason: AbortReason) {
        if !self.is_over() {
            self.outcome = Outcome::Aborted(reason);
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
