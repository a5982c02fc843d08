//! Deterministic synthetic bar series for the demo command.
//!
//! Uses a linear congruential generator so demo output is reproducible
//! without pulling in `rand`.

use chrono::{Duration, NaiveDate};
use wavetrend_core::domain::Bar;

const DRIFT: f64 = 0.0004;
const VOLATILITY: f64 = 0.012;

/// Generate a seeded random-walk daily bar series starting at 100.0.
pub fn synthetic_bars(n: usize, seed: u64) -> Vec<Bar> {
    let start_date = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    let mut rng_state = seed;
    let mut price = 100.0_f64;

    (0..n)
        .map(|i| {
            // LCG producing values in [-1, 1]
            rng_state = rng_state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let u = ((rng_state >> 33) as f64) / (u32::MAX as f64) * 2.0 - 1.0;

            let open = price;
            let close = (open * (1.0 + DRIFT + VOLATILITY * u)).max(1.0);
            let high = open.max(close) * (1.0 + VOLATILITY / 4.0);
            let low = open.min(close) * (1.0 - VOLATILITY / 4.0);
            let volume = 500_000.0 + ((rng_state >> 40) % 500_000) as f64;
            price = close;

            Bar {
                date: start_date + Duration::days(i as i64),
                open,
                high,
                low,
                close,
                volume,
            }
        })
        .collect()
}
