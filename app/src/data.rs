// In app/src/data.rs

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use core_types::Kline;

/// Loads a JSON array of klines, oldest first.
pub fn load_klines(path: &Path) -> Result<Vec<Kline>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read bar file {}", path.display()))?;
    let klines: Vec<Kline> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse bar file {}", path.display()))?;

    if let (Some(first), Some(last)) = (klines.first(), klines.last()) {
        tracing::info!(
            count = klines.len(),
            from = ?Utc.timestamp_millis_opt(first.open_time).single(),
            to = ?Utc.timestamp_millis_opt(last.open_time).single(),
            "Loaded klines."
        );
    } else {
        tracing::warn!(path = %path.display(), "Bar file contains no klines.");
    }

    Ok(klines)
}
