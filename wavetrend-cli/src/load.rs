//! CSV bar ingestion.
//!
//! Expected header: `date,open,high,low,close,volume` with ISO dates. The
//! loader fails on malformed records but only warns on bars that fail the
//! OHLC sanity check — the pipeline computes through them.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use wavetrend_core::domain::Bar;

#[derive(Debug, Deserialize)]
struct BarRow {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

impl From<BarRow> for Bar {
    fn from(row: BarRow) -> Self {
        Bar {
            date: row.date,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
        }
    }
}

/// Read a bar series from a CSV file, in file order.
pub fn load_bars_csv(path: &Path) -> Result<Vec<Bar>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut bars: Vec<Bar> = Vec::new();
    for (i, row) in reader.deserialize::<BarRow>().enumerate() {
        let row = row.with_context(|| {
            format!("malformed bar record {} in {}", i + 1, path.display())
        })?;
        bars.push(row.into());
    }

    let insane = bars.iter().filter(|bar| !bar.is_sane()).count();
    if insane > 0 {
        log::warn!(
            "{}: {insane} of {} bars fail the OHLC sanity check",
            path.display(),
            bars.len()
        );
    }
    log::info!("loaded {} bars from {}", bars.len(), path.display());

    Ok(bars)
}

/// Instrument label for a bar file: the file stem, uppercased.
pub fn instrument_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_uppercase())
        .unwrap_or_else(|| "UNKNOWN".to_string())
}
