//! CLI subcommands.

pub mod plan;
pub mod run;
pub mod version;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

/// Parses the `--at` override, defaulting to the current instant.
///
/// This is the only wall-clock read in the program; everything downstream
/// receives the instant explicitly.
pub fn reference_instant(at: Option<&str>) -> Result<DateTime<Utc>> {
    match at {
        None => Ok(Utc::now()),
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|t| t.with_timezone(&Utc))
            .with_context(|| format!("--at {raw:?} is not an ISO-8601 timestamp")),
    }
}
