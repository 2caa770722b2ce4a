//! Network Module
//!
//! TCP listener and per-player line channels.
//!
//! ## Architecture
//! - Single acceptor thread pairing connections in arrival order
//! - One session thread per pair
//! - Every protocol line goes through a `ParticipantChannel`

mod channel;
mod server;

pub use channel::{LineChannel, ParticipantChannel, TcpChannel};
pub use server::{Server, ServerStats, ShutdownHandle};
