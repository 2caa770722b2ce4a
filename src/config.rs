//! Configuration for tictacnet
//!
//! Centralized configuration with sensible defaults.

use std::time::Duration;

use crate::error::{Result, TicTacError};

/// Main configuration for a tictacnet server
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// TCP listen address
    pub listen_addr: String,

    /// How long the accept loop sleeps when no connection is pending
    /// (milliseconds). Also bounds how quickly shutdown is noticed.
    pub accept_poll_ms: u64,

    /// Connection read timeout (milliseconds, 0 = wait forever)
    ///
    /// A turn has no time limit by default: a stalled player stalls
    /// their own session and nothing else.
    pub read_timeout_ms: u64,

    /// Connection write timeout (milliseconds, 0 = wait forever)
    pub write_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Session Configuration
    // -------------------------------------------------------------------------
    /// Max games running at the same time
    pub max_sessions: usize,

    /// Stop accepting after this many games have been started
    /// (`None` = serve forever)
    pub session_limit: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: format!("127.0.0.1:{}", crate::DEFAULT_PORT),
            accept_poll_ms: 50,
            read_timeout_ms: 0,
            write_timeout_ms: 0,
            max_sessions: 64,
            session_limit: None,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Read timeout as a `Duration`, `None` when disabled
    pub fn read_timeout(&self) -> Option<Duration> {
        (self.read_timeout_ms > 0).then(|| Duration::from_millis(self.read_timeout_ms))
    }

    /// Write timeout as a `Duration`, `None` when disabled
    pub fn write_timeout(&self) -> Option<Duration> {
        (self.write_timeout_ms > 0).then(|| Duration::from_millis(self.write_timeout_ms))
    }

    /// Reject settings the server cannot run with
    ///
    /// A zero session cap would leave the accept loop waiting forever for
    /// a free slot, and a zero session limit would serve nothing.
    pub fn validate(&self) -> Result<()> {
        if self.max_sessions == 0 {
            return Err(TicTacError::Config(
                "max_sessions must be at least 1".to_string(),
            ));
        }
        if self.session_limit == Some(0) {
            return Err(TicTacError::Config(
                "session_limit must be at least 1 when set".to_string(),
            ));
        }
        Ok(())
    }

    /// Accept loop poll interval
    pub fn accept_poll(&self) -> Duration {
        Duration::from_millis(self.accept_poll_ms.max(1))
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the TCP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Set the accept loop poll interval (in milliseconds)
    pub fn accept_poll_ms(mut self, ms: u64) -> Self {
        self.config.accept_poll_ms = ms;
        self
    }

    /// Set the read timeout (in milliseconds, 0 disables it)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds, 0 disables it)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Set the maximum number of concurrent games
    pub fn max_sessions(mut self, count: usize) -> Self {
        self.config.max_sessions = count;
        self
    }

    /// Stop the server after this many games have been started
    pub fn session_limit(mut self, limit: Option<usize>) -> Self {
        self.config.session_limit = limit;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
