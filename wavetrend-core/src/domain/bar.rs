//! Bar — the fundamental market data unit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// OHLCV bar for one trading period of a single instrument.
///
/// Bars are immutable once supplied by the data source. A bar series is
/// ordered by date ascending with no duplicates; `validate_bar_series`
/// checks that contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// Average of high, low, and close — the oscillator's input price.
    pub fn hlc3(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// Midpoint of high and low — the momentum histogram's input price.
    pub fn hl2(&self) -> f64 {
        (self.high + self.low) / 2.0
    }

    /// Basic OHLC sanity check: high >= low, high bounds open/close,
    /// positive open/close. Callers may warn on insane bars; the core
    /// computes through them regardless.
    pub fn is_sane(&self) -> bool {
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
            && self.close > 0.0
    }
}

/// Bar series contract violations.
///
/// Missing trading days are fine; duplicated or out-of-order dates are not.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeriesError {
    #[error("duplicate date {date} at index {index}")]
    DuplicateDate { index: usize, date: NaiveDate },

    #[error("out-of-order date {date} at index {index} (previous: {prev})")]
    OutOfOrder {
        index: usize,
        prev: NaiveDate,
        date: NaiveDate,
    },
}

/// Check that dates are strictly increasing. An empty series is valid.
pub fn validate_bar_series(bars: &[Bar]) -> Result<(), SeriesError> {
    for (i, pair) in bars.windows(2).enumerate() {
        let (prev, next) = (&pair[0], &pair[1]);
        if next.date == prev.date {
            return Err(SeriesError::DuplicateDate {
                index: i + 1,
                date: next.date,
            });
        }
        if next.date < prev.date {
            return Err(SeriesError::OutOfOrder {
                index: i + 1,
                prev: prev.date,
                date: next.date,
            });
        }
    }
    Ok(())
}
