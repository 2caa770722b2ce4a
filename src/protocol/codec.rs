//! Protocol codec
//!
//! Encoding and decoding functions for the line protocol.
//!
//! ## Line Format
//!
//! ```text
//! <KEYWORD> [<arg> ...]\n
//! ```
//!
//! - Tokens are separated by ASCII whitespace
//! - A trailing `\r` is dropped, so `\r\n` peers work too
//! - `BOARD` is the only multi-line message: header + 3 row lines

use std::io::{BufRead, Read, Write};

use crate::error::{Result, TicTacError};
use crate::game::{Board, Cell, Role, BOARD_SIZE};
use super::{Command, MessageKind, ServerMessage};

// =============================================================================
// Board Rows
// =============================================================================

/// Encode one board row as `<c0> <c1> <c2>`
pub fn encode_board_row(row: &[Cell; BOARD_SIZE]) -> String {
    let markers: Vec<String> = row.iter().map(|c| c.marker().to_string()).collect();
    markers.join(" ")
}

/// Decode one `<c0> <c1> <c2>` row line
pub fn decode_board_row(line: &str) -> Result<[Cell; BOARD_SIZE]> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != BOARD_SIZE {
        return Err(TicTacError::Protocol(format!(
            "Board row: expected {} cells, got {} in {:?}",
            BOARD_SIZE,
            tokens.len(),
            line
        )));
    }

    let mut row = [Cell::Empty; BOARD_SIZE];
    for (slot, token) in row.iter_mut().zip(tokens) {
        *slot = Cell::from_marker(token).ok_or_else(|| {
            TicTacError::Protocol(format!("Board row: unknown cell marker {:?}", token))
        })?;
    }
    Ok(row)
}

// =============================================================================
// Server Message Encoding/Decoding
// =============================================================================

/// Encode a server message into its protocol lines (without terminators)
pub fn encode_message(message: &ServerMessage) -> Vec<String> {
    let keyword = message.kind().keyword();

    match message {
        ServerMessage::Role(role) | ServerMessage::Turn(role) | ServerMessage::Win(role) => {
            vec![format!("{} {}", keyword, role)]
        }
        ServerMessage::Board(board) => {
            let mut lines = Vec::with_capacity(1 + BOARD_SIZE);
            lines.push(keyword.to_string());
            lines.extend(board.rows().map(encode_board_row));
            lines
        }
        ServerMessage::YourMove | ServerMessage::Ok | ServerMessage::Invalid | ServerMessage::Draw => {
            vec![keyword.to_string()]
        }
    }
}

/// Decode a server message from its complete set of lines
///
/// `lines[0]` is the header; a `BOARD` message must carry exactly 3 more.
pub fn decode_message<S: AsRef<str>>(lines: &[S]) -> Result<ServerMessage> {
    let header = lines
        .first()
        .ok_or_else(|| TicTacError::Protocol("Empty message".to_string()))?
        .as_ref();

    let tokens: Vec<&str> = header.split_whitespace().collect();
    let keyword = tokens.first().copied().unwrap_or("");
    let kind = MessageKind::from_keyword(keyword).ok_or_else(|| {
        TicTacError::Protocol(format!("Unknown message: {:?}", header))
    })?;

    let expected_lines = if kind == MessageKind::Board { 1 + BOARD_SIZE } else { 1 };
    if lines.len() != expected_lines {
        return Err(TicTacError::Protocol(format!(
            "{}: expected {} lines, got {}",
            kind.keyword(),
            expected_lines,
            lines.len()
        )));
    }

    match kind {
        MessageKind::Role => decode_role_arg(&tokens).map(ServerMessage::Role),
        MessageKind::Turn => decode_role_arg(&tokens).map(ServerMessage::Turn),
        MessageKind::Win => decode_role_arg(&tokens).map(ServerMessage::Win),
        MessageKind::Board => {
            expect_bare(&tokens)?;
            let mut rows = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
            for (row, line) in rows.iter_mut().zip(&lines[1..]) {
                *row = decode_board_row(line.as_ref())?;
            }
            Ok(ServerMessage::Board(Board::from_rows(rows)))
        }
        MessageKind::YourMove => expect_bare(&tokens).map(|_| ServerMessage::YourMove),
        MessageKind::Ok => expect_bare(&tokens).map(|_| ServerMessage::Ok),
        MessageKind::Invalid => expect_bare(&tokens).map(|_| ServerMessage::Invalid),
        MessageKind::Draw => expect_bare(&tokens).map(|_| ServerMessage::Draw),
    }
}

/// `<KEYWORD> <X|O>`
fn decode_role_arg(tokens: &[&str]) -> Result<Role> {
    match tokens {
        [_, role] => Role::from_token(role).ok_or_else(|| {
            TicTacError::Protocol(format!("{}: unknown role {:?}", tokens[0], role))
        }),
        _ => Err(TicTacError::Protocol(format!(
            "{}: expected exactly one role argument",
            tokens[0]
        ))),
    }
}

/// Keyword with no arguments
fn expect_bare(tokens: &[&str]) -> Result<()> {
    if tokens.len() != 1 {
        return Err(TicTacError::Protocol(format!(
            "{}: unexpected arguments {:?}",
            tokens[0],
            &tokens[1..]
        )));
    }
    Ok(())
}

// =============================================================================
// Player Command Encoding/Decoding
// =============================================================================

/// Encode a command as a single line
pub fn encode_command(command: &Command) -> String {
    match command {
        Command::Move { row, col } => format!("{} {} {}", command.keyword(), row, col),
    }
}

/// Decode a player line
///
/// Accepts exactly `MOVE <int> <int>`. Range is not checked here.
pub fn decode_command(line: &str) -> Result<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    match tokens.as_slice() {
        ["MOVE", row, col] => {
            let row = parse_coordinate(row)?;
            let col = parse_coordinate(col)?;
            Ok(Command::Move { row, col })
        }
        ["MOVE", ..] => Err(TicTacError::Protocol(format!(
            "MOVE: expected 2 coordinates, got {}",
            tokens.len() - 1
        ))),
        _ => Err(TicTacError::Protocol(format!("Unknown command: {:?}", line))),
    }
}

fn parse_coordinate(token: &str) -> Result<i64> {
    token.parse::<i64>().map_err(|_| {
        TicTacError::Protocol(format!("MOVE: coordinate {:?} is not an integer", token))
    })
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Longest line accepted from a peer, terminator excluded
pub const MAX_LINE_LEN: usize = 1024;

/// Read one line, without its terminator
///
/// Returns `None` at end-of-stream. Blocks until a full line arrives.
/// Bytes that are not valid UTF-8 are replaced, so such a line still comes
/// back and fails later as a malformed command. A line longer than
/// `MAX_LINE_LEN` is skipped up to its newline and reported as a
/// protocol error.
pub fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut buf = Vec::new();
    let read = reader
        .by_ref()
        .take(MAX_LINE_LEN as u64 + 1)
        .read_until(b'\n', &mut buf)?;
    if read == 0 {
        return Ok(None);
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    } else if buf.len() > MAX_LINE_LEN {
        discard_line(reader)?;
        return Err(TicTacError::Protocol(format!(
            "Line longer than {} bytes",
            MAX_LINE_LEN
        )));
    }

    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// Skip the rest of the current line without buffering it
fn discard_line<R: BufRead>(reader: &mut R) -> Result<()> {
    loop {
        let (found, used) = {
            let available = reader.fill_buf()?;
            if available.is_empty() {
                return Ok(());
            }
            match available.iter().position(|&b| b == b'\n') {
                Some(i) => (true, i + 1),
                None => (false, available.len()),
            }
        };
        reader.consume(used);
        if found {
            return Ok(());
        }
    }
}

/// Write one line and flush it
pub fn write_line<W: Write>(writer: &mut W, line: &str) -> Result<()> {
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Read a complete server message from a stream
///
/// Returns `None` if the stream ends before a header line. A stream that
/// ends inside a `BOARD` message is a protocol error.
pub fn read_message<R: BufRead>(reader: &mut R) -> Result<Option<ServerMessage>> {
    let header = match read_line(reader)? {
        Some(line) => line,
        None => return Ok(None),
    };

    let mut lines = vec![header];
    if lines[0].split_whitespace().next() == Some(MessageKind::Board.keyword()) {
        for _ in 0..BOARD_SIZE {
            match read_line(reader)? {
                Some(row) => lines.push(row),
                None => {
                    return Err(TicTacError::Protocol(
                        "BOARD: stream ended before all rows arrived".to_string(),
                    ))
                }
            }
        }
    }

    decode_message(&lines).map(Some)
}

/// Write a server message to a stream
pub fn write_message<W: Write>(writer: &mut W, message: &ServerMessage) -> Result<()> {
    for line in encode_message(message) {
        write_line(writer, &line)?;
    }
    Ok(())
}

/// Write a player command to a stream
pub fn write_command<W: Write>(writer: &mut W, command: &Command) -> Result<()> {
    write_line(writer, &encode_command(command))
}
