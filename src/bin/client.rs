//! tictacnet Client Binary
//!
//! Plays one game from the terminal.

use std::io::{self, BufRead, Write};

use clap::Parser;
use tictacnet::client::Client;
use tictacnet::protocol::ServerMessage;
use tictacnet::TicTacError;
use tracing_subscriber::{fmt, EnvFilter};

/// tictacnet Client
#[derive(Parser, Debug)]
#[command(name = "tictacnet-client")]
#[command(about = "Play tic-tac-toe against another player on a tictacnet server")]
#[command(version)]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:5000")]
    server: String,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let args = Args::parse();

    let mut client = match Client::connect(&args.server) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to connect to {}: {}", args.server, e);
            std::process::exit(1);
        }
    };
    println!("Connected to server {}.", client.server_addr());

    if let Err(e) = play(&mut client) {
        tracing::error!("Connection error: {}", e);
        std::process::exit(1);
    }
}

/// Render server messages until the game ends
fn play(client: &mut Client) -> tictacnet::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        let message = match client.next_message() {
            Ok(Some(message)) => message,
            Ok(None) => {
                println!("Server closed the connection.");
                return Ok(());
            }
            Err(TicTacError::Protocol(reason)) => {
                println!("Server: {}", reason);
                continue;
            }
            Err(e) => return Err(e),
        };

        match message {
            ServerMessage::Role(role) => println!("You are: {}", role),
            ServerMessage::Board(board) => println!("Current board:\n{}", board),
            ServerMessage::Turn(role) => println!("Turn: {}", role),
            ServerMessage::YourMove => {
                let row = prompt_coordinate(&mut input, "row")?;
                let col = prompt_coordinate(&mut input, "col")?;
                client.send_move(row, col)?;
            }
            ServerMessage::Ok => println!("Move accepted."),
            ServerMessage::Invalid => println!("Invalid move, try again when prompted."),
            ServerMessage::Win(role) => {
                println!("{} wins!", role);
                return Ok(());
            }
            ServerMessage::Draw => {
                println!("Game ended in a draw.");
                return Ok(());
            }
        }
    }
}

/// Ask until the user types an integer
fn prompt_coordinate<R: BufRead>(input: &mut R, name: &str) -> tictacnet::Result<i64> {
    loop {
        print!("Enter {} (0-2): ", name);
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(TicTacError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "standard input closed",
            )));
        }

        match line.trim().parse::<i64>() {
            Ok(value) => return Ok(value),
            Err(_) => println!("Please enter a whole number."),
        }
    }
}
