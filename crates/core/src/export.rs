//! Batch result keying and JSON export envelope
//!
//! Batch runs accumulate results in a map keyed by a normalized scenario
//! name. Normalization lowercases the name, replaces spaces with
//! underscores and drops hyphens; two scenario names that normalize to the
//! same key silently overwrite each other, matching the historical batch
//! behavior. Callers that need to distinguish such scenarios must rename
//! them.
//!
//! Export wraps the accumulated results in a `{metadata, configuration,
//! results}` envelope and writes it as pretty-printed UTF-8 JSON.

use crate::config::LocationConfig;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::info;

/// Errors raised while exporting results to disk.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The envelope could not be serialized.
    #[error("failed to serialize export envelope: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The output file could not be written.
    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}

/// Normalize a scenario name into a batch result key.
///
/// Lowercase, spaces become underscores, hyphens are dropped. Collisions
/// overwrite silently.
pub fn normalize_scenario_key(name: &str) -> String {
    name.to_lowercase().replace(' ', "_").replace('-', "")
}

/// Envelope metadata describing the producing module and study area.
#[derive(Debug, Clone, Serialize)]
pub struct ExportMetadata {
    /// Producing module name (e.g. "FloodSim").
    pub module: &'static str,
    /// Module version string.
    pub version: &'static str,
    /// Study-area location echo.
    pub location: LocationConfig,
    /// Unix timestamp (seconds) of export generation.
    pub generated_unix_s: u64,
    /// Number of scenarios in the results map.
    pub scenarios_count: usize,
}

/// The `{metadata, configuration, results}` export envelope.
#[derive(Debug, Serialize)]
pub struct ExportEnvelope<C, R>
where
    C: Serialize,
    R: Serialize,
{
    /// Module and study-area metadata.
    pub metadata: ExportMetadata,
    /// Calibration constants of the producing simulator.
    pub configuration: C,
    /// Results keyed by normalized scenario name.
    pub results: FxHashMap<String, R>,
}

/// Current unix time in whole seconds (0 if the clock is before the epoch).
pub(crate) fn unix_now_s() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Serialize an envelope and write it to `path` as pretty JSON.
///
/// # Errors
/// Returns [`ExportError`] when serialization or the file write fails.
pub fn write_envelope<C, R>(
    path: impl AsRef<Path>,
    envelope: &ExportEnvelope<C, R>,
) -> Result<(), ExportError>
where
    C: Serialize,
    R: Serialize,
{
    let json = serde_json::to_string_pretty(envelope)?;
    std::fs::write(path.as_ref(), json)?;
    info!(
        module = envelope.metadata.module,
        scenarios = envelope.metadata.scenarios_count,
        path = %path.as_ref().display(),
        "results exported"
    );
    Ok(())
}
