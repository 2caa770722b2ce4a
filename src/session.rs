//! Session Module
//!
//! The coordinator for one game between two connected players.
//!
//! ## Responsibilities
//! - Tell each player their role (first channel X, second O)
//! - Broadcast board and turn before every move
//! - Prompt the active player until a legal move arrives
//! - Announce the final board and the result
//! - Release both channels on every exit path
//!
//! ## State Machine
//!
//! ```text
//! AwaitingPlayers → RoleAssigned → Turn(X) ⇄ Turn(O) → Finished(outcome)
//! ```
//!
//! A session is strictly sequential: at any point it waits on exactly one
//! channel. A rejected move loops back to `YOUR_MOVE` for the same player
//! without touching board or turn. End-of-stream or an I/O failure on
//! either channel stops the session at once; nothing more is sent to
//! either player.

use crate::error::TicTacError;
use crate::game::{AbortReason, Game, Outcome, Role};
use crate::network::ParticipantChannel;
use crate::protocol::{decode_command, Command, ServerMessage};

/// Where a session is in its lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Created, roles not sent yet
    AwaitingPlayers,

    /// Both players know their role
    RoleAssigned,

    /// Waiting on this role's move
    Turn(Role),

    /// Win, draw or aborted
    Finished(Outcome),
}

/// One game bound to two participant channels
///
/// The session owns its board, turn and channels exclusively; nothing
/// else ever touches them.
pub struct Session<X, O> {
    id: u64,
    x: X,
    o: O,
    game: Game,
    state: SessionState,
}

impl<X: ParticipantChannel, O: ParticipantChannel> Session<X, O> {
    /// Bind two channels; the first plays X, the second O
    pub fn new(x: X, o: O) -> Self {
        Self {
            id: 0,
            x,
            o,
            game: Game::new(),
            state: SessionState::AwaitingPlayers,
        }
    }

    /// Set the id used in log lines
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Hand back both channels (X first)
    pub fn into_channels(self) -> (X, O) {
        (self.x, self.o)
    }

    /// Play the game to the end (blocking)
    ///
    /// Returns the terminal outcome. Both channels are closed before this
    /// returns, whatever happened. Calling it again on a finished session
    /// just returns the same outcome.
    pub fn run(&mut self) -> Outcome {
        if let SessionState::Finished(outcome) = &self.state {
            return outcome.clone();
        }

        tracing::info!(
            "Session {} started: X={} O={}",
            self.id,
            self.x.peer(),
            self.o.peer()
        );

        if let Err(reason) = self.play() {
            tracing::info!(
                "Session {} stopped: {} channel failed: {:?}",
                self.id,
                reason.role(),
                reason
            );
            self.game.abort(reason);
        }

        self.release();

        let outcome = self.game.outcome().clone();
        tracing::info!(
            "Session {} finished after {} moves: {:?}",
            self.id,
            self.game.moves_played(),
            outcome
        );
        self.state = SessionState::Finished(outcome.clone());
        outcome
    }

    /// Main loop; an `Err` means a channel failed
    fn play(&mut self) -> Result<Outcome, AbortReason> {
        self.send(Role::X, &ServerMessage::Role(Role::X))?;
        self.send(Role::O, &ServerMessage::Role(Role::O))?;
        self.state = SessionState::RoleAssigned;

        loop {
            let turn = self.game.turn();
            self.state = SessionState::Turn(turn);

            self.broadcast(&ServerMessage::Board(self.game.board().clone()))?;
            self.broadcast(&ServerMessage::Turn(turn))?;

            let outcome = self.take_move(turn)?;
            let result = match &outcome {
                Outcome::InProgress => continue,
                Outcome::Win(role) => ServerMessage::Win(*role),
                Outcome::Draw => ServerMessage::Draw,
                Outcome::Aborted(reason) => return Err(reason.clone()),
            };

            self.broadcast(&ServerMessage::Board(self.game.board().clone()))?;
            self.broadcast(&result)?;
            return Ok(outcome);
        }
    }

    /// Prompt `role` until it sends a legal move
    fn take_move(&mut self, role: Role) -> Result<Outcome, AbortReason> {
        loop {
            self.send(role, &ServerMessage::YourMove)?;
            let command = self
                .receive(role)?
                .and_then(|line| decode_command(&line));

            match command {
                Ok(Command::Move { row, col }) => match self.game.play(row, col) {
                    Ok(outcome) => {
                        tracing::debug!("Session {}: {} played ({}, {})", self.id, role, row, col);
                        self.send(role, &ServerMessage::Ok)?;
                        return Ok(outcome);
                    }
                    Err(e) => {
                        tracing::debug!("Session {}: rejected move from {}: {}", self.id, role, e);
                    }
                },
                Err(e) => {
                    tracing::debug!("Session {}: malformed line from {}: {}", self.id, role, e);
                }
            }

            self.send(role, &ServerMessage::Invalid)?;
        }
    }

    // =========================================================================
    // Channel Helpers
    // =========================================================================

    fn channel(&mut self, role: Role) -> &mut dyn ParticipantChannel {
        match role {
            Role::X => &mut self.x,
            Role::O => &mut self.o,
        }
    }

    fn send(&mut self, role: Role, message: &ServerMessage) -> Result<(), AbortReason> {
        self.channel(role)
            .send_message(message)
            .map_err(|e| AbortReason::Transport {
                role,
                message: e.to_string(),
            })
    }

    /// X first, then O
    fn broadcast(&mut self, message: &ServerMessage) -> Result<(), AbortReason> {
        self.send(Role::X, message)?;
        self.send(Role::O, message)
    }

    /// Next line from `role`
    ///
    /// The outer `Err` stops the session; the inner one is a line that
    /// arrived but could not be framed and is answered like any other
    /// malformed move.
    fn receive(&mut self, role: Role) -> Result<crate::Result<String>, AbortReason> {
        match self.channel(role).receive_line() {
            Ok(Some(line)) => Ok(Ok(line)),
            Ok(None) => Err(AbortReason::Disconnected(role)),
            Err(e @ TicTacError::Protocol(_)) => Ok(Err(e)),
            Err(e) => Err(AbortReason::Transport {
                role,
                message: e.to_string(),
            }),
        }
    }

    fn release(&mut self) {
        for role in [Role::X, Role::O] {
            let id = self.id;
            if let Err(e) = self.channel(role).close() {
                tracing::debug!("Session {}: error closing {} channel: {}", id, role, e);
            }
        }
    }
}

/// Run one complete session over two channels
///
/// Convenience for `Session::new(x, o).run()`.
pub fn run_session<X, O>(x: X, o: O) -> Outcome
where
    X: ParticipantChannel,
    O: ParticipantChannel,
{
    Session::new(x, o).run()
}
