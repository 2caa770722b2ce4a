//! TCP Server
//!
//! Accepts connections, pairs them into games and runs each game on its
//! own thread.

use std::io::ErrorKind;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::time::Duration;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;

use crate::config::Config;
use crate::error::{Result, TicTacError};
use crate::game::{Outcome, Role};
use crate::session::Session;

use super::{ParticipantChannel, TcpChannel};

/// Counters over every finished game
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerStats {
    pub sessions_started: u64,
    pub sessions_finished: u64,
    pub x_wins: u64,
    pub o_wins: u64,
    pub draws: u64,
    pub aborted: u64,
}

impl ServerStats {
    fn record(&mut self, outcome: &Outcome) {
        self.sessions_finished += 1;
        match outcome {
            Outcome::Win(Role::X) => self.x_wins += 1,
            Outcome::Win(Role::O) => self.o_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Aborted(_) => self.aborted += 1,
            Outcome::InProgress => {}
        }
    }
}

/// Cloneable handle that stops a running server
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandle {
    /// Stop accepting; running games are left to finish on their own
    pub fn shutdown(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_shutdown(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Report sent by a session thread when its game ends
struct SessionReport {
    id: u64,
    outcome: Outcome,
}

/// TCP server for tictacnet
///
/// ## Pairing
/// Connections are paired in arrival order: the first of each pair plays
/// X, the second O. A lone waiting player holds no game state; the session
/// only exists once both channels do.
pub struct Server {
    config: Config,
    listener: TcpListener,
    shutdown: ShutdownHandle,
    stats: Arc<Mutex<ServerStats>>,
    next_session_id: u64,
}

impl Server {
    /// Bind the configured listen address
    pub fn bind(config: Config) -> Result<Self> {
        config.validate()?;

        let listener = TcpListener::bind(&config.listen_addr).map_err(|e| {
            TicTacError::Network(format!("failed to bind {}: {}", config.listen_addr, e))
        })?;

        // Non-blocking accept so the loop can notice shutdown
        listener.set_nonblocking(true)?;

        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self {
            config,
            listener,
            shutdown: ShutdownHandle {
                flag: Arc::new(AtomicBool::new(false)),
            },
            stats: Arc::new(Mutex::new(ServerStats::default())),
            next_session_id: 1,
        })
    }

    /// Address actually bound (useful with port 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// Signal the server to stop accepting
    pub fn shutdown(&self) {
        self.shutdown.shutdown();
    }

    /// Snapshot of the game counters
    pub fn stats(&self) -> ServerStats {
        self.stats.lock().clone()
    }

    /// Shared handle to the counters, readable while `run` blocks
    pub fn stats_handle(&self) -> Arc<Mutex<ServerStats>> {
        Arc::clone(&self.stats)
    }

    /// Start the server (blocking)
    ///
    /// Returns after `shutdown()` or, when a session limit is configured,
    /// once that many games have been started and all of them finished.
    pub fn run(&mut self) -> Result<()> {
        let (report_tx, report_rx) = channel::unbounded::<SessionReport>();
        let mut handles: Vec<JoinHandle<()>> = Vec::new();
        let mut active = 0usize;
        let mut started = 0usize;
        let mut waiting: Option<TcpChannel> = None;
        let poll = self.config.accept_poll();

        loop {
            active -= self.collect_reports(&report_rx);
            handles.retain(|h| !h.is_finished());

            if self.shutdown.is_shutdown() {
                tracing::info!("Shutdown requested, {} game(s) still running", active);
                break;
            }

            if self.config.session_limit.is_some_and(|limit| started >= limit) {
                if active == 0 {
                    tracing::info!("Session limit of {} reached", started);
                    break;
                }
                self.wait_for_report(&report_rx, &mut active, poll);
                continue;
            }

            if active >= self.config.max_sessions {
                self.wait_for_report(&report_rx, &mut active, poll);
                continue;
            }

            let stream = match self.listener.accept() {
                Ok((stream, _)) => stream,
                Err(e) if e.kind() == ErrorKind::WouldBlock => {
                    thread::sleep(poll);
                    continue;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    // One bad accept never takes the listener down
                    tracing::warn!("Accept failed: {}", e);
                    thread::sleep(poll);
                    continue;
                }
            };

            let channel = match self.open_channel(stream) {
                Ok(channel) => channel,
                Err(e) => {
                    tracing::warn!("Failed to set up connection: {}", e);
                    continue;
                }
            };

            let x = match waiting.take() {
                None => {
                    tracing::info!("Player X connected from {}, waiting for O", channel.peer_addr());
                    waiting = Some(channel);
                    continue;
                }
                Some(x) => x,
            };
            tracing::info!("Player O connected from {}", channel.peer_addr());

            match self.spawn_session(x, channel, report_tx.clone()) {
                Ok(handle) => {
                    handles.push(handle);
                    active += 1;
                    started += 1;
                }
                Err(e) => tracing::error!("Failed to start session: {}", e),
            }
        }

        if let Some(mut lonely) = waiting.take() {
            let _ = lonely.close();
        }

        // With a session limit every game has reported; joining is instant
        if self.config.session_limit.is_some() {
            for handle in handles {
                let _ = handle.join();
            }
        }

        Ok(())
    }

    /// Apply timeouts from config to a fresh connection
    fn open_channel(&self, stream: TcpStream) -> Result<TcpChannel> {
        let mut channel = TcpChannel::new(stream)?;
        channel.set_timeouts(self.config.read_timeout(), self.config.write_timeout())?;
        Ok(channel)
    }

    fn spawn_session(
        &mut self,
        x: TcpChannel,
        o: TcpChannel,
        report_tx: Sender<SessionReport>,
    ) -> Result<JoinHandle<()>> {
        let id = self.next_session_id;
        self.next_session_id += 1;
        self.stats.lock().sessions_started += 1;

        let handle = thread::Builder::new()
            .name(format!("session-{}", id))
            .spawn(move || {
                let outcome = Session::new(x, o).with_id(id).run();
                // The server may already be gone; the game is over either way
                let _ = report_tx.send(SessionReport { id, outcome });
            })?;

        Ok(handle)
    }

    /// Drain finished sessions without blocking; returns how many
    fn collect_reports(&self, report_rx: &Receiver<SessionReport>) -> usize {
        let mut finished = 0;
        while let Ok(report) = report_rx.try_recv() {
            self.record(report);
            finished += 1;
        }
        finished
    }

    /// Block up to one poll interval for a finished session
    fn wait_for_report(
        &self,
        report_rx: &Receiver<SessionReport>,
        active: &mut usize,
        poll: Duration,
    ) {
        match report_rx.recv_timeout(poll) {
            Ok(report) => {
                self.record(report);
                *active -= 1;
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {}
        }
    }

    fn record(&self, report: SessionReport) {
        tracing::debug!("Session {} reported {:?}", report.id, report.outcome);
        self.stats.lock().record(&report.outcome);
    }
}
