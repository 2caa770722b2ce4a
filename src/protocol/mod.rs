//! Protocol Module
//!
//! Defines the line-oriented text protocol between server and players.
//!
//! ## Protocol Format
//!
//! Every message is one or more ASCII lines terminated by `\n`.
//! Tokens are case-sensitive and separated by spaces.
//!
//! ### Server → Player
//! ```text
//! ROLE X          assigned role, sent once
//! BOARD           followed by exactly 3 rows:
//! X . O             cell markers '.', 'X', 'O'
//! . X .
//! . . O
//! TURN O          whose turn is next
//! YOUR_MOVE       sent to the active player only
//! OK              last move accepted
//! INVALID         last move rejected, a new YOUR_MOVE follows
//! WIN X           terminal
//! DRAW            terminal
//! ```
//!
//! ### Player → Server
//! ```text
//! MOVE <row> <col>
//! ```
//! Anything else where a move is expected is answered with `INVALID`.

mod command;
mod message;
mod codec;

pub use command::Command;
pub use message::{MessageKind, ServerMessage};
pub use codec::{
    decode_board_row, decode_command, decode_message, encode_board_row, encode_command,
    encode_message, read_line, read_message, write_command, write_line, write_message,
    MAX_LINE_LEN,
};
