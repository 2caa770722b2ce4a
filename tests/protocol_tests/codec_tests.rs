//! Codec Tests
//!
//! Tests for server message and player command encoding/decoding.

use std::io::Cursor;

use tictacnet::game::{Board, Cell, Role};
use tictacnet::protocol::{
    Command, ServerMessage,
    decode_board_row, decode_command, decode_message,
    encode_board_row, encode_command, encode_message,
    read_line, read_message, write_command, write_message, MAX_LINE_LEN,
};
use tictacnet::TicTacError;

// =============================================================================
// Helper Functions
// =============================================================================

fn sample_board() -> Board {
    Board::from_rows([
        [Cell::X, Cell::Empty, Cell::O],
        [Cell::Empty, Cell::X, Cell::Empty],
        [Cell::Empty, Cell::Empty, Cell::O],
    ])
}

// =============================================================================
// Server Message Encoding Tests
// =============================================================================

#[test]
fn test_encode_single_line_messages() {
    assert_eq!(encode_message(&ServerMessage::Role(Role::X)), vec!["ROLE X"]);
    assert_eq!(encode_message(&ServerMessage::Turn(Role::O)), vec!["TURN O"]);
    assert_eq!(encode_message(&ServerMessage::YourMove), vec!["YOUR_MOVE"]);
    assert_eq!(encode_message(&ServerMessage::Ok), vec!["OK"]);
    assert_eq!(encode_message(&ServerMessage::Invalid), vec!["INVALID"]);
    assert_eq!(encode_message(&ServerMessage::Win(Role::O)), vec!["WIN O"]);
    assert_eq!(encode_message(&ServerMessage::Draw), vec!["DRAW"]);
}

#[test]
fn test_encode_board() {
    let lines = encode_message(&ServerMessage::Board(sample_board()));

    assert_eq!(lines, vec!["BOARD", "X . O", ". X .", ". . O"]);
}

#[test]
fn test_encode_empty_board() {
    let lines = encode_message(&ServerMessage::Board(Board::new()));

    assert_eq!(lines, vec!["BOARD", ". . .", ". . .", ". . ."]);
}

// =============================================================================
// Server Message Decoding Tests
// =============================================================================

#[test]
fn test_decode_board_message() {
    let decoded = decode_message(&["BOARD", "X . O", ". X .", ". . O"]).unwrap();

    assert_eq!(decoded, ServerMessage::Board(sample_board()));
}

#[test]
fn test_decode_role_turn_win() {
    assert_eq!(decode_message(&["ROLE O"]).unwrap(), ServerMessage::Role(Role::O));
    assert_eq!(decode_message(&["TURN X"]).unwrap(), ServerMessage::Turn(Role::X));
    assert_eq!(decode_message(&["WIN X"]).unwrap(), ServerMessage::Win(Role::X));
}

#[test]
fn test_decode_unknown_keyword() {
    let result = decode_message(&["HELLO"]);
    assert!(result.unwrap_err().to_string().contains("Unknown message"));
}

#[test]
fn test_decode_tokens_are_case_sensitive() {
    assert!(decode_message(&["ok"]).is_err());
    assert!(decode_message(&["ROLE x"]).is_err());
}

#[test]
fn test_decode_missing_role() {
    assert!(decode_message(&["ROLE"]).is_err());
    assert!(decode_message(&["WIN X O"]).is_err());
}

#[test]
fn test_decode_bare_keyword_with_arguments() {
    let result = decode_message(&["DRAW now"]);
    assert!(result.unwrap_err().to_string().contains("unexpected arguments"));
}

#[test]
fn test_decode_board_wrong_line_count() {
    let result = decode_message(&["BOARD", ". . .", ". . ."]);
    assert!(result.unwrap_err().to_string().contains("expected 4 lines"));
}

#[test]
fn test_decode_board_row_errors() {
    assert!(decode_board_row("X O").is_err());
    assert!(decode_board_row("X O X X").is_err());
    assert!(decode_board_row("X - O").is_err());
}

#[test]
fn test_board_row_round_trip() {
    let row = [Cell::O, Cell::Empty, Cell::X];
    assert_eq!(encode_board_row(&row), "O . X");
    assert_eq!(decode_board_row("O . X").unwrap(), row);
}

// =============================================================================
// Player Command Tests
// =============================================================================

#[test]
fn test_decode_move() {
    assert_eq!(decode_command("MOVE 1 2").unwrap(), Command::Move { row: 1, col: 2 });
}

#[test]
fn test_decode_move_keeps_out_of_range_values() {
    // Range is checked by the game, not the codec
    assert_eq!(decode_command("MOVE 5 5").unwrap(), Command::Move { row: 5, col: 5 });
    assert_eq!(decode_command("MOVE -1 0").unwrap(), Command::Move { row: -1, col: 0 });
}

#[test]
fn test_decode_move_tolerates_extra_whitespace() {
    assert_eq!(decode_command("  MOVE  0   2 ").unwrap(), Command::Move { row: 0, col: 2 });
}

#[test]
fn test_decode_malformed_moves() {
    let malformed = [
        "",
        "MOVE",
        "MOVE 1",
        "MOVE 1 2 3",
        "MOVE a b",
        "MOVE 1 two",
        "MOVE 1.0 2",
        "move 1 2",
        "PLACE 1 2",
        "1 2",
    ];

    for line in malformed {
        assert!(decode_command(line).is_err(), "{:?} should be rejected", line);
    }
}

#[test]
fn test_decode_move_error_messages() {
    let err = decode_command("MOVE 1").unwrap_err().to_string();
    assert!(err.contains("expected 2 coordinates"));

    let err = decode_command("MOVE x 1").unwrap_err().to_string();
    assert!(err.contains("not an integer"));

    let err = decode_command("JUMP").unwrap_err().to_string();
    assert!(err.contains("Unknown command"));
}

#[test]
fn test_encode_move() {
    assert_eq!(encode_command(&Command::Move { row: 2, col: 0 }), "MOVE 2 0");
}

// =============================================================================
// Stream I/O Tests
// =============================================================================

#[test]
fn test_read_line_strips_terminators() {
    let mut reader = Cursor::new(b"MOVE 1 1\r\nOK\nlast".to_vec());

    assert_eq!(read_line(&mut reader).unwrap(), Some("MOVE 1 1".to_string()));
    assert_eq!(read_line(&mut reader).unwrap(), Some("OK".to_string()));
    assert_eq!(read_line(&mut reader).unwrap(), Some("last".to_string()));
    assert_eq!(read_line(&mut reader).unwrap(), None);
}

#[test]
fn test_read_line_replaces_invalid_utf8() {
    let mut reader = Cursor::new(b"MOVE \xff 0\nMOVE 0 0\n".to_vec());

    let line = read_line(&mut reader).unwrap().unwrap();
    assert_eq!(line, "MOVE \u{FFFD} 0");
    assert!(decode_command(&line).is_err());

    // The stream stays usable
    assert_eq!(read_line(&mut reader).unwrap(), Some("MOVE 0 0".to_string()));
}

#[test]
fn test_read_line_accepts_max_length() {
    let long = "A".repeat(MAX_LINE_LEN);
    let mut reader = Cursor::new(format!("{}\nOK\n", long).into_bytes());

    assert_eq!(read_line(&mut reader).unwrap(), Some(long));
    assert_eq!(read_line(&mut reader).unwrap(), Some("OK".to_string()));
}

#[test]
fn test_read_line_rejects_overlong_and_resyncs() {
    let mut bytes = vec![b'A'; MAX_LINE_LEN * 3];
    bytes.extend_from_slice(b"\nMOVE 1 1\n");
    let mut reader = Cursor::new(bytes);

    assert!(matches!(read_line(&mut reader), Err(TicTacError::Protocol(_))));
    assert_eq!(read_line(&mut reader).unwrap(), Some("MOVE 1 1".to_string()));
    assert_eq!(read_line(&mut reader).unwrap(), None);
}

#[test]
fn test_read_line_overlong_at_eof() {
    let mut reader = Cursor::new(vec![b'A'; MAX_LINE_LEN + 1]);

    assert!(matches!(read_line(&mut reader), Err(TicTacError::Protocol(_))));
    assert_eq!(read_line(&mut reader).unwrap(), None);
}

#[test]
fn test_write_then_read_messages() {
    let mut buffer = Vec::new();
    let messages = vec![
        ServerMessage::Role(Role::X),
        ServerMessage::Board(sample_board()),
        ServerMessage::Turn(Role::X),
        ServerMessage::YourMove,
        ServerMessage::Draw,
    ];
    for message in &messages {
        write_message(&mut buffer, message).unwrap();
    }

    let mut reader = Cursor::new(buffer);
    let mut decoded = Vec::new();
    while let Some(message) = read_message(&mut reader).unwrap() {
        decoded.push(message);
    }

    assert_eq!(decoded, messages);
}

#[test]
fn test_write_message_wire_bytes() {
    let mut buffer = Vec::new();
    write_message(&mut buffer, &ServerMessage::Board(Board::new())).unwrap();
    write_message(&mut buffer, &ServerMessage::Win(Role::X)).unwrap();

    assert_eq!(
        String::from_utf8(buffer).unwrap(),
        "BOARD\n. . .\n. . .\n. . .\nWIN X\n"
    );
}

#[test]
fn test_read_message_truncated_board() {
    let mut reader = Cursor::new(b"BOARD\n. . .\n".to_vec());

    let result = read_message(&mut reader);
    assert!(result.unwrap_err().to_string().contains("stream ended"));
}

#[test]
fn test_read_message_at_eof() {
    let mut reader = Cursor::new(Vec::new());

    assert_eq!(read_message(&mut reader).unwrap(), None);
}

#[test]
fn test_write_command_line() {
    let mut buffer = Vec::new();
    write_command(&mut buffer, &Command::Move { row: 0, col: 1 }).unwrap();

    assert_eq!(buffer, b"MOVE 0 1\n");
}
