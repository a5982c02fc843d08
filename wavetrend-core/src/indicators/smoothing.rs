//! Moving-average smoothing primitives over optional-valued series.
//!
//! EMA is the non-adjusted recursive form: out[0] = in[0],
//! out[i] = alpha * in[i] + (1 - alpha) * out[i-1], alpha = 2 / (span + 1).
//! There is no warm-up bias correction and no SMA seed.
//!
//! Undefined inputs are explicit `None`, never NaN. The smoothing state is an
//! explicit fold accumulator; no module-level carry-over between calls.

/// Exponential moving average over a partially-defined series.
///
/// Output is `None` exactly at indices where the input is `None`. The
/// accumulator is seeded by the first defined input and carried across
/// undefined gaps, so the filter resumes rather than re-seeds after a gap.
pub fn ema(series: &[Option<f64>], span: usize) -> Vec<Option<f64>> {
    assert!(span >= 1, "EMA span must be >= 1");
    let alpha = 2.0 / (span as f64 + 1.0);

    let mut prev: Option<f64> = None;
    series
        .iter()
        .map(|value| match *value {
            None => None,
            Some(x) => {
                let smoothed = match prev {
                    None => x,
                    Some(p) => alpha * x + (1.0 - alpha) * p,
                };
                prev = Some(smoothed);
                Some(smoothed)
            }
        })
        .collect()
}

/// Exponential moving average over a fully-defined series.
///
/// Same recurrence as `ema`; total by construction, so callers of always-
/// defined intermediate series need no unwrapping.
pub fn ema_full(series: &[f64], span: usize) -> Vec<f64> {
    assert!(span >= 1, "EMA span must be >= 1");
    let alpha = 2.0 / (span as f64 + 1.0);

    let mut prev: Option<f64> = None;
    series
        .iter()
        .map(|&x| {
            let smoothed = match prev {
                None => x,
                Some(p) => alpha * x + (1.0 - alpha) * p,
            };
            prev = Some(smoothed);
            smoothed
        })
        .collect()
}

/// Simple moving average of the trailing `window` values.
///
/// Output at index i is `None` for i < window - 1 (insufficient history) and
/// wherever the trailing window contains an undefined value — this is how an
/// undefined region widens through a rolling window.
pub fn sma(series: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    assert!(window >= 1, "SMA window must be >= 1");

    (0..series.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            let trailing = &series[i + 1 - window..=i];
            let mut sum = 0.0;
            for value in trailing {
                sum += (*value)?;
            }
            Some(sum / window as f64)
        })
        .collect()
}
