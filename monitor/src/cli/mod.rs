//! CLI module for rinzler-monitor
//!
//! `serve` (default) runs the collector and the HTTP server,
//! `check` runs a single collection cycle and prints the result.

pub mod check;
pub mod serve;

use clap::{Parser, Subcommand};

/// Rinzler Grid Monitor - status aggregator for self-hosted media services
#[derive(Parser, Debug)]
#[command(name = "rinzler-monitor")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    MONITOR_HOST                   Bind address (default: 0.0.0.0)
    MONITOR_PORT                   Listen port (default: 8080)
    MONITOR_COLLECT_INTERVAL_SECS  Seconds between collection cycles (default: 30)
    MONITOR_PROBE_TIMEOUT_SECS     Per-request probe timeout, 0 disables (default: 10)
    MONITOR_LOG_LEVEL              Log level (default: info, RUST_LOG overrides)
    MONITOR_LOG_DIR                Write daily rotated log files to this directory

    PLEX_URL / PLEX_TOKEN
    TAUTULLI_URL / TAUTULLI_API_KEY
    RADARR_URL / RADARR_API_KEY
    SONARR_URL / SONARR_API_KEY
    READARR_URL / READARR_API_KEY
    LIDARR_URL / LIDARR_API_KEY
    BAZARR_URL / BAZARR_API_KEY
    JACKETT_URL / JACKETT_API_KEY
    TRANSMISSION_URL / TRANSMISSION_USER / TRANSMISSION_PASS
    ARGO_URL / ARGO_TOKEN
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the collector and the status server
    Serve(serve::ServeArgs),
    /// Probe every service once and print the results as JSON
    Check(check::CheckArgs),
}
