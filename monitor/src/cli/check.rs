//! check subcommand
//!
//! Runs one collection cycle against the configured services and prints
//! the resulting snapshot in the same shape as `GET /api/status`.

use crate::collector::Collector;
use crate::common::error::MonitorResult;
use crate::common::types::StatusRecord;
use crate::config::MonitorConfig;
use crate::probe::{build_client, build_probes};
use crate::store::StatusStore;
use clap::Args;
use std::collections::BTreeMap;

/// Arguments for the check subcommand
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Pretty-print the JSON output
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}

/// Render a snapshot as JSON
pub fn render(snapshot: &BTreeMap<String, StatusRecord>, pretty: bool) -> MonitorResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(snapshot)?
    } else {
        serde_json::to_string(snapshot)?
    };
    Ok(json)
}

/// Execute the check command
///
/// Returns `true` when every probed service is healthy.
pub async fn execute(args: &CheckArgs) -> MonitorResult<bool> {
    let config = MonitorConfig::from_env();
    let client = build_client(config.probe_timeout)?;
    let store = StatusStore::new();

    Collector::new(build_probes(&config), store.clone(), client)
        .run_cycle()
        .await;

    let snapshot = store.read_all().await;
    println!("{}", render(&snapshot, args.pretty)?);

    Ok(snapshot.values().all(|record| record.healthy))
}
