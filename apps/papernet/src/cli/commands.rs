//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use super::DataArgs;
use crate::{api, config::ServerConfig};
use papernet_core::{ConversionOptions, PapernetError, RecordStore, StoreSummary, convert_dir};
use std::path::Path;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Layer CLI flags over the file and environment configuration.
pub fn resolve_config(
    config_path: Option<&Path>,
    host: Option<String>,
    port: Option<u16>,
    data: &DataArgs,
) -> Result<ServerConfig, PapernetError> {
    let mut config = ServerConfig::load(config_path)?;
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(dir) = &data.data_dir {
        config.data_dir.clone_from(dir);
    }
    if data.papers.is_some() {
        config.papers.clone_from(&data.papers);
    }
    if data.citations.is_some() {
        config.citations.clone_from(&data.citations);
    }
    if data.authorships.is_some() {
        config.authorships.clone_from(&data.authorships);
    }
    Ok(config)
}

/// Load the record store and log its size.
fn load_store(config: &ServerConfig) -> Result<RecordStore, PapernetError> {
    let store = RecordStore::load(&config.data_sources())?;
    let summary = store.summary();
    tracing::info!(
        papers = summary.papers,
        citations = summary.citations,
        authorships = ?summary.authorships,
        "Tables loaded from {}",
        config.data_dir.display()
    );
    Ok(store)
}

fn print_json(value: &impl serde::Serialize) -> Result<(), PapernetError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| PapernetError::Serialization(e.to_string()))?;
    println!("{}", text);
    Ok(())
}

// =============================================================================
// SERVE COMMAND
// =============================================================================

/// Load the tables and start the HTTP server.
pub async fn cmd_serve(
    config_path: Option<&Path>,
    host: Option<String>,
    port: Option<u16>,
    data: &DataArgs,
) -> Result<(), PapernetError> {
    let config = resolve_config(config_path, host, port, data)?;
    let store = load_store(&config)?;

    println!("papernet Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Address:  {}", config.addr());
    println!("  Data dir: {}", config.data_dir.display());
    println!();
    println!("Endpoints:");
    println!("  GET /api/citations        - Citation network");
    println!("  GET /api/collaborations   - Co-authorship network");
    println!("  GET /api/timeline         - Papers per year");
    println!("  GET /api/patent_histogram - Patent-count histogram");
    println!("  GET /api/health           - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    api::run_server(&config, store).await
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

fn print_summary(summary: &StoreSummary) {
    let span = match (summary.min_year, summary.max_year) {
        (Some(min), Some(max)) => format!("{}-{}", min, max),
        _ => "n/a".to_string(),
    };
    let authorships = summary
        .authorships
        .map_or_else(|| "(not loaded)".to_string(), |n| n.to_string());

    println!("papernet Table Status");
    println!("=====================");
    println!("Papers:      {}", summary.papers);
    println!("Citations:   {}", summary.citations);
    println!("Authorships: {}", authorships);
    println!("Years:       {}", span);
}

/// Load the tables and print their sizes.
pub fn cmd_status(
    config_path: Option<&Path>,
    data: &DataArgs,
    json_mode: bool,
) -> Result<(), PapernetError> {
    let config = resolve_config(config_path, None, None, data)?;
    let summary = load_store(&config)?.summary();

    if json_mode {
        return print_json(&summary);
    }
    print_summary(&summary);
    Ok(())
}

// =============================================================================
// CONVERT COMMAND
// =============================================================================

/// Normalize a raw export.
pub fn cmd_convert(
    input: &Path,
    output: &Path,
    field: String,
    institution: String,
    json_mode: bool,
) -> Result<(), PapernetError> {
    let options = ConversionOptions { field, institution };
    let report = convert_dir(input, output, &options)?;
    tracing::info!(
        papers = report.papers,
        citations = report.citations,
        authorships = report.authorships,
        "Converted {} into {}",
        input.display(),
        output.display()
    );

    if json_mode {
        return print_json(&report);
    }
    println!("Converted:");
    println!("  papers.csv:      {} rows", report.papers);
    println!("  citations.csv:   {} rows", report.citations);
    println!("  authorships.csv: {} rows", report.authorships);
    Ok(())
}
