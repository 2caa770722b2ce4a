//! tictacnet Server Binary
//!
//! Starts the TCP server and pairs players into games.

use clap::Parser;
use tictacnet::network::Server;
use tictacnet::Config;
use tracing_subscriber::{fmt, EnvFilter};

/// tictacnet Server
#[derive(Parser, Debug)]
#[command(name = "tictacnet-server")]
#[command(about = "Two-player tic-tac-toe over a line-oriented TCP protocol")]
#[command(version)]
struct Args {
    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:5000")]
    listen: String,

    /// Maximum games running at once
    #[arg(short, long, default_value = "64")]
    max_sessions: usize,

    /// Serve a single game, then exit
    #[arg(long, conflicts_with = "games")]
    once: bool,

    /// Serve this many games, then exit
    #[arg(short, long)]
    games: Option<usize>,

    /// Read timeout per line in milliseconds (0 = wait forever)
    #[arg(long, default_value = "0")]
    read_timeout_ms: u64,

    /// Write timeout per line in milliseconds (0 = wait forever)
    #[arg(long, default_value = "0")]
    write_timeout_ms: u64,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tictacnet=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("tictacnet Server v{}", tictacnet::VERSION);
    tracing::info!("Listen address: {}", args.listen);

    let session_limit = if args.once { Some(1) } else { args.games };

    // Build config from args
    let config = Config::builder()
        .listen_addr(&args.listen)
        .max_sessions(args.max_sessions)
        .session_limit(session_limit)
        .read_timeout_ms(args.read_timeout_ms)
        .write_timeout_ms(args.write_timeout_ms)
        .build();

    let mut server = match Server::bind(config) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to start server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    let stats = server.stats();
    tracing::info!(
        "Server stopped: {} games, X won {}, O won {}, {} draws, {} aborted",
        stats.sessions_finished,
        stats.x_wins,
        stats.o_wins,
        stats.draws,
        stats.aborted
    );
}
