//! CLI for hookbuf
//!
//! Subcommands:
//! - `server`: run the public and internal listeners
//! - `poll`: poll the internal endpoint once, as the consumer would

use std::sync::Arc;

use clap::Parser;
use hookbuf::client::PollClient;
use hookbuf::config::{DEFAULT_CONFIG_PATH, load_config_from};
use hookbuf::relay::RelayState;
use hookbuf::transport::RelayServer;
use hookbuf::utils::RelayError;
use hookbuf::utils::logging;
use tokio::sync::watch;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "hookbuf")]
enum Command {
    /// Start the public webhook and internal retrieval listeners
    Server {
        /// Configuration file, without extension
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: String,
    },
    /// Poll the internal endpoint once and print the delivered messages.
    /// Polled messages are removed from the relay.
    Poll {
        /// Internal retrieval URL
        #[arg(long, default_value = "http://127.0.0.1:8081/internal/api/hooks")]
        url: String,
        /// Shared secret for the internal endpoint
        #[arg(long, env = "HOOKBUF_TOKEN")]
        token: String,
    },
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cmd = Command::parse();

    match cmd {
        Command::Server { config } => {
            if let Err(e) = run_server(&config).await {
                logging::init("info");
                error!("Server failed: {}", e);
                std::process::exit(1);
            }
        }
        Command::Poll { url, token } => {
            logging::init("warn");
            if let Err(e) = run_poll(&url, &token).await {
                error!("Poll failed: {}", e);
                std::process::exit(1);
            }
        }
    }
}

async fn run_server(config_path: &str) -> Result<(), RelayError> {
    let settings = load_config_from(config_path)?;
    logging::init(&settings.logging.level);
    info!("Starting..");

    let state = Arc::new(RelayState::from_settings(&settings));
    let server = RelayServer::bind(&settings, state)?;
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let mut relay = tokio::spawn(server.run(shutdown_rx));

    tokio::select! {
        finished = &mut relay => {
            error!("Relay server exited unexpectedly.");
            return finished?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully.");
        }
    }

    let _ = shutdown_tx.send(true);
    relay.await?
}

async fn run_poll(url: &str, token: &str) -> Result<(), RelayError> {
    let response = PollClient::new(url, token)?.poll().await?;
    if !response.status.is_success() {
        return Err(RelayError::PollRejected(response.status));
    }

    for message in &response.messages {
        println!("{message}");
    }
    info!("Received {} messages", response.messages.len());
    Ok(())
}
