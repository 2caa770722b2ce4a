//! Participant Channels
//!
//! Line-oriented duplex channels, one per connected player.

use std::io::{BufRead, BufReader, BufWriter, Write};
use std::net::{Shutdown, TcpStream};
use std::time::Duration;

use crate::error::{Result, TicTacError};
use crate::protocol::{encode_message, read_line, write_line, ServerMessage};

/// A duplex line channel to one player
///
/// Every sent line is flushed before `send_line` returns, so the peer can
/// observe it before the next one is written. `receive_line` blocks until a
/// whole line arrives and returns `None` once the stream has ended.
pub trait ParticipantChannel {
    /// Write one line (terminator added) and flush it
    fn send_line(&mut self, line: &str) -> Result<()>;

    /// Block for the next line, `None` at end-of-stream
    fn receive_line(&mut self) -> Result<Option<String>>;

    /// Release the underlying stream
    fn close(&mut self) -> Result<()>;

    /// Peer description for logging
    fn peer(&self) -> &str {
        "unknown"
    }

    /// Send every line of a typed server message
    fn send_message(&mut self, message: &ServerMessage) -> Result<()> {
        for line in encode_message(message) {
            self.send_line(&line)?;
        }
        Ok(())
    }
}

// =============================================================================
// TCP Channel
// =============================================================================

/// Channel over a TCP connection
pub struct TcpChannel {
    /// TCP stream reader (buffered for line reads)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (flushed after every line)
    writer: BufWriter<TcpStream>,

    /// Peer address for logging
    peer_addr: String,

    closed: bool,
}

impl TcpChannel {
    /// Wrap an accepted stream
    ///
    /// Sets up buffered I/O in blocking mode with Nagle disabled.
    pub fn new(stream: TcpStream) -> Result<Self> {
        // Get peer address for logging before we split the stream
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Accepted sockets inherit non-blocking mode from the listener on some platforms
        stream.set_nonblocking(false)?;

        // Every protocol line is tiny and latency-bound
        stream.set_nodelay(true)?;

        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            peer_addr,
            closed: false,
        })
    }

    /// Configure connection timeouts (`None` waits forever)
    pub fn set_timeouts(&mut self, read: Option<Duration>, write: Option<Duration>) -> Result<()> {
        self.reader.get_ref().set_read_timeout(read)?;
        self.writer.get_ref().set_write_timeout(write)?;
        Ok(())
    }

    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

impl ParticipantChannel for TcpChannel {
    fn send_line(&mut self, line: &str) -> Result<()> {
        if self.closed {
            return Err(TicTacError::Network(format!("channel to {} is closed", self.peer_addr)));
        }
        tracing::trace!("-> {}: {}", self.peer_addr, line);
        write_line(&mut self.writer, line)
    }

    fn receive_line(&mut self) -> Result<Option<String>> {
        if self.closed {
            return Ok(None);
        }
        let line = read_line(&mut self.reader)?;
        tracing::trace!("<- {}: {:?}", self.peer_addr, line);
        Ok(line)
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        // Push out anything still buffered, then release both directions
        let flushed = self.writer.flush();
        match self.writer.get_ref().shutdown(Shutdown::Both) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotConnected => {}
            Err(e) => return Err(e.into()),
        }
        flushed?;

        tracing::debug!("Closed channel to {}", self.peer_addr);
        Ok(())
    }

    fn peer(&self) -> &str {
        &self.peer_addr
    }
}

// =============================================================================
// Generic Line Channel
// =============================================================================

/// Channel over any buffered reader and writer pair
///
/// Used for in-memory sessions: a `Cursor` of scripted input on one side and
/// a `Vec<u8>` collecting output on the other.
pub struct LineChannel<R, W> {
    reader: R,
    writer: W,
    label: String,
    closed: bool,
}

impl<R: BufRead, W: Write> LineChannel<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self::with_label(reader, writer, "memory")
    }

    /// Create a channel with a name used in log lines
    pub fn with_label(reader: R, writer: W, label: impl Into<String>) -> Self {
        Self {
            reader,
            writer,
            label: label.into(),
            closed: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Give back the reader and writer
    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl<R: BufRead, W: Write> ParticipantChannel for LineChannel<R, W> {
    fn send_line(&mut self, line: &str) -> Result<()> {
        if self.closed {
            return Err(TicTacError::Network(format!("channel {} is closed", self.label)));
        }
        write_line(&mut self.writer, line)
    }

    fn receive_line(&mut self) -> Result<Option<String>> {
        if self.closed {
            return Ok(None);
        }
        read_line(&mut self.reader)
    }

    fn close(&mut self) -> Result<()> {
        if !self.closed {
            self.closed = true;
            self.writer.flush()?;
        }
        Ok(())
    }

    fn peer(&self) -> &str {
        &self.label
    }
}
