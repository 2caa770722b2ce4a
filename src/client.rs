//! Client Module
//!
//! Player side of the protocol: read typed server messages, send moves.

use std::io::{BufReader, BufWriter};
use std::net::TcpStream;

use crate::error::Result;
use crate::protocol::{read_message, write_command, write_line, Command, ServerMessage};

/// A connected player
pub struct Client {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
    server_addr: String,
}

impl Client {
    /// Connect to a server at `host:port`
    pub fn connect(addr: &str) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;
        stream.set_nodelay(true)?;

        let server_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| addr.to_string());

        let read_stream = stream.try_clone()?;
        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(stream),
            server_addr,
        })
    }

    pub fn server_addr(&self) -> &str {
        &self.server_addr
    }

    /// Next complete message, `None` once the server hangs up
    pub fn next_message(&mut self) -> Result<Option<ServerMessage>> {
        read_message(&mut self.reader)
    }

    /// Send `MOVE <row> <col>`
    pub fn send_move(&mut self, row: i64, col: i64) -> Result<()> {
        write_command(&mut self.writer, &Command::Move { row, col })
    }

    /// Send an arbitrary line as-is
    pub fn send_line(&mut self, line: &str) -> Result<()> {
        write_line(&mut self.writer, line)
    }
}
