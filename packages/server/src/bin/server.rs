//! Hiroba message relay server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --host 0.0.0.0 --port 3000
//! ```

use std::{sync::Arc, time::Duration};

use clap::Parser;
use hiroba_server::{bootstrap::build_server, config::ServerConfig};
use hiroba_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(about = "Real-time message relay with rooms, presence and typing indicators", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HIROBA_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "5000")]
    port: u16,

    /// Number of global messages replayed to new connections
    #[arg(long, env = "HIROBA_HISTORY_CAPACITY", default_value = "100")]
    history_capacity: usize,

    /// Seconds until a silent typing indicator is cleared
    #[arg(long, env = "HIROBA_TYPING_TIMEOUT_SECS", default_value = "5")]
    typing_timeout_secs: u64,

    /// Default log level (overridden by RUST_LOG)
    #[arg(long, env = "HIROBA_LOG_LEVEL", default_value = "debug")]
    log_level: String,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            history_capacity: args.history_capacity,
            typing_timeout: Duration::from_secs(args.typing_timeout_secs),
            ..ServerConfig::default()
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let config = ServerConfig::from(args);
    tracing::debug!("{:?}", config);

    let server = build_server(&config, Arc::new(SystemClock));
    if let Err(e) = server.run(&config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
