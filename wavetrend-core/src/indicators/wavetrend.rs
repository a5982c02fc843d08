//! WaveTrend oscillator pair and the Awesome Oscillator momentum histogram.
//!
//! Per bar i:
//!   hlc3 = (high + low + close) / 3
//!   esa  = ema(hlc3, channel_span)
//!   d    = ema(|hlc3 - esa|, channel_span)
//!   ci   = (hlc3 - esa) / (scale * d)        undefined when d == 0
//!   wt1  = ema(ci, average_span)
//!   wt2  = sma(wt1, signal_window)
//!   ao   = ema(hl2, ao_fast) - ema(hl2, ao_slow)
//!
//! Note the seed rule makes esa[0] == hlc3[0], so d[0] == 0 and the channel
//! index is always undefined at index 0; a flat price run keeps d at zero and
//! the undefined region open.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::smoothing::{ema, ema_full, sma};
use crate::domain::Bar;

/// Fixed oscillator parameters. `Default` supplies the canonical constants;
/// they are not exposed as user configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveTrendParams {
    /// n1 — channel (esa/deviation) smoothing span.
    pub channel_span: usize,
    /// n2 — oscillator (wt1) smoothing span.
    pub average_span: usize,
    /// wt2 trailing window over wt1.
    pub signal_window: usize,
    /// Awesome Oscillator fast EMA span.
    pub ao_fast: usize,
    /// Awesome Oscillator slow EMA span.
    pub ao_slow: usize,
    /// Channel-index scale constant.
    pub scale: f64,
}

impl Default for WaveTrendParams {
    fn default() -> Self {
        Self {
            channel_span: 10,
            average_span: 21,
            signal_window: 4,
            ao_fast: 5,
            ao_slow: 34,
            scale: 0.015,
        }
    }
}

/// Derived indicator values for one bar, index-aligned with the bar series.
///
/// `hlc3`, `esa`, `deviation`, and `ao` are total under the non-adjusted EMA;
/// the channel index and the lines derived from it are partial and carry
/// `None` where undefined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub hlc3: f64,
    pub esa: f64,
    pub deviation: f64,
    pub channel_index: Option<f64>,
    pub wt1: Option<f64>,
    pub wt2: Option<f64>,
    pub ao: f64,
}

/// Compute the full indicator series. Pure; one point per bar.
pub fn compute_wavetrend(bars: &[Bar], params: &WaveTrendParams) -> Vec<IndicatorPoint> {
    let hlc3: Vec<f64> = bars.iter().map(Bar::hlc3).collect();
    let esa = ema_full(&hlc3, params.channel_span);

    let abs_dev: Vec<f64> = hlc3
        .iter()
        .zip(&esa)
        .map(|(price, mean)| (price - mean).abs())
        .collect();
    let deviation = ema_full(&abs_dev, params.channel_span);

    // Division by a zero deviation is a legitimate degenerate case (flat
    // price run); it propagates as undefined, never as infinity or zero.
    let channel_index: Vec<Option<f64>> = hlc3
        .iter()
        .zip(&esa)
        .zip(&deviation)
        .map(|((price, mean), dev)| {
            if *dev == 0.0 {
                None
            } else {
                Some((price - mean) / (params.scale * dev))
            }
        })
        .collect();

    let wt1 = ema(&channel_index, params.average_span);
    let wt2 = sma(&wt1, params.signal_window);

    let hl2: Vec<f64> = bars.iter().map(Bar::hl2).collect();
    let ao_fast = ema_full(&hl2, params.ao_fast);
    let ao_slow = ema_full(&hl2, params.ao_slow);

    bars.iter()
        .enumerate()
        .map(|(i, bar)| IndicatorPoint {
            date: bar.date,
            hlc3: hlc3[i],
            esa: esa[i],
            deviation: deviation[i],
            channel_index: channel_index[i],
            wt1: wt1[i],
            wt2: wt2[i],
            ao: ao_fast[i] - ao_slow[i],
        })
        .collect()
}
