//! # papernet - Research Graph Server
//!
//! The main binary for papernet.
//!
//! This application provides:
//! - HTTP JSON API server (axum-based) for the visualization frontend
//! - CLI interface for inspecting and converting tables
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                apps/papernet (THE BINARY)               │
//! │                                                         │
//! │   ┌─────────────┐    ┌─────────────┐    ┌───────────┐   │
//! │   │    CLI      │    │  HTTP API   │    │  Config   │   │
//! │   │   (clap)    │    │   (axum)    │    │  (toml)   │   │
//! │   └──────┬──────┘    └──────┬──────┘    └─────┬─────┘   │
//! │          └──────────────────┼─────────────────┘         │
//! │                             ▼                           │
//! │                    ┌────────────────┐                   │
//! │                    │ papernet-core  │                   │
//! │                    │  (THE LOGIC)   │                   │
//! │                    └────────────────┘                   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server over ./data
//! papernet serve --data-dir data --port 5001
//!
//! # Table sizes
//! papernet status --json-mode
//!
//! # Normalize a raw export
//! papernet convert --input raw --output data
//! ```

use clap::Parser;
use papernet::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // PAPERNET_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("PAPERNET_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "papernet=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the papernet startup banner.
fn print_banner() {
    println!(
        r#"
  ┌─┐┌─┐┌─┐┌─┐┬─┐┌┐┌┌─┐┌┬┐
  ├─┘├─┤├─┘├┤ ├┬┘│││├┤  │
  ┴  ┴ ┴┴  └─┘┴└─┘└┘└─┘ ┴

  Research Graph Server v{}

  Citations • Collaborations • Bounded Sampling
"#,
        env!("CARGO_PKG_VERSION")
    );
}
