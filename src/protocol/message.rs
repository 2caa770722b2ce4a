//! Server message definitions
//!
//! Represents everything the server tells a player.

use crate::game::{Board, Role};

/// Message kinds, one per leading keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Role,
    Board,
    Turn,
    YourMove,
    Ok,
    Invalid,
    Win,
    Draw,
}

impl MessageKind {
    /// Leading keyword on the wire
    pub fn keyword(self) -> &'static str {
        match self {
            MessageKind::Role => "ROLE",
            MessageKind::Board => "BOARD",
            MessageKind::Turn => "TURN",
            MessageKind::YourMove => "YOUR_MOVE",
            MessageKind::Ok => "OK",
            MessageKind::Invalid => "INVALID",
            MessageKind::Win => "WIN",
            MessageKind::Draw => "DRAW",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let kind = match keyword {
            "ROLE" => MessageKind::Role,
            "BOARD" => MessageKind::Board,
            "TURN" => MessageKind::Turn,
            "YOUR_MOVE" => MessageKind::YourMove,
            "OK" => MessageKind::Ok,
            "INVALID" => MessageKind::Invalid,
            "WIN" => MessageKind::Win,
            "DRAW" => MessageKind::Draw,
            _ => return None,
        };
        Some(kind)
    }
}

/// A message from the server to one player
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    /// Role assignment
    Role(Role),

    /// Current board (header plus 3 row lines)
    Board(Board),

    /// Whose turn is next
    Turn(Role),

    /// Request a move from the active player
    YourMove,

    /// Last move accepted
    Ok,

    /// Last move line rejected
    Invalid,

    /// Game won
    Win(Role),

    /// Game drawn
    Draw,
}

impl ServerMessage {
    pub fn kind(&self) -> MessageKind {
        match self {
            ServerMessage::Role(_) => MessageKind::Role,
            ServerMessage::Board(_) => MessageKind::Board,
            ServerMessage::Turn(_) => MessageKind::Turn,
            ServerMessage::YourMove => MessageKind::YourMove,
            ServerMessage::Ok => MessageKind::Ok,
            ServerMessage::Invalid => MessageKind::Invalid,
            ServerMessage::Win(_) => MessageKind::Win,
            ServerMessage::Draw => MessageKind::Draw,
        }
    }

    /// `WIN` and `DRAW` end the game
    pub fn is_terminal(&self) -> bool {
        matches!(self, ServerMessage::Win(_) | ServerMessage::Draw)
    }
}
