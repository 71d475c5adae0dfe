//! scrawl server binary
//!
//! Reads protocol lines from stdin, runs them through the validation
//! pipeline, and serves the stream to a viewer over WebSocket.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use scrawl::protocol::LineReader;
use scrawl::schema::SchemaRegistry;
use scrawl::server::{ServerConfig, ViewerListener, DEFAULT_SOCKET_PORT};
use scrawl::session::{Session, SessionEvent};

#[derive(Parser)]
#[command(name = "scrawl")]
#[command(about = "Validate and relay a drawing-command stream to a viewer", long_about = None)]
struct Cli {
    /// Maximum lines forwarded per second (omit for unlimited)
    #[arg(short, long)]
    rate: Option<u32>,

    /// Port for the viewer WebSocket
    #[arg(short, long, default_value_t = DEFAULT_SOCKET_PORT)]
    port: u16,

    /// Write logs to this file instead of stderr
    #[arg(short, long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> std::io::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::sync::Arc::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> scrawl::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let config = ServerConfig::default()
        .bind(SocketAddr::from(([0, 0, 0, 0], cli.port)))
        .rate(cli.rate.unwrap_or(0));

    tracing::info!(rate = ?config.rate, addr = %config.bind_addr, "initializing");

    let (events_tx, events_rx) = Session::channel();
    let session = Session::new(SchemaRegistry::standard(), config.rate, events_rx);

    // Input side: stdin lines become session events
    let input_tx = events_tx.clone();
    tokio::spawn(async move {
        let mut reader = LineReader::new(tokio::io::stdin());
        tracing::info!("listening on stdin");

        loop {
            match reader.next_line().await {
                Ok(Some(line)) => {
                    if input_tx.send(SessionEvent::Line(line)).is_err() {
                        break;
                    }
                }
                Ok(None) => {
                    tracing::info!("input stream ended");
                    break;
                }
                Err(e) => {
                    tracing::error!(error = %e, "input read failed");
                    break;
                }
            }
        }
    });

    // Viewer side: WebSocket connects and closes become session events
    let listener = ViewerListener::new(config.bind_addr, events_tx);
    tokio::spawn(async move {
        if let Err(e) = listener.run().await {
            tracing::error!(error = %e, "viewer listener failed");
        }
    });

    session.run().await;

    Ok(())
}
