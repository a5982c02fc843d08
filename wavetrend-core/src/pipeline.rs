//! Pipeline orchestrator: bars → indicators → signals → simulation.
//!
//! Stateless; safe to invoke repeatedly and concurrently with different
//! inputs. Data flows strictly forward — each stage produces a new derived
//! series and never mutates a predecessor's output.

use crate::domain::{validate_bar_series, Bar, SeriesError, SimulationResult};
use crate::engine::run_simulation;
use crate::indicators::{compute_wavetrend, IndicatorPoint, WaveTrendParams};
use crate::signals::{detect_crossovers, CrossoverSignals};

/// Everything one pipeline invocation produces, index-aligned with the
/// input bar series.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub indicators: Vec<IndicatorPoint>,
    pub signals: CrossoverSignals,
    pub simulation: SimulationResult,
}

/// Run the full pipeline over one instrument's bar series.
///
/// The only fallible step is the series contract check — duplicate or
/// out-of-order dates. Insufficient history, flat price runs, and empty
/// input all come back as `Ok` with undefined indicator values, no signals,
/// or empty sequences respectively.
pub fn run_pipeline(
    bars: &[Bar],
    params: &WaveTrendParams,
    initial_capital: f64,
) -> Result<PipelineResult, SeriesError> {
    validate_bar_series(bars)?;

    let indicators = compute_wavetrend(bars, params);
    let wt1: Vec<Option<f64>> = indicators.iter().map(|p| p.wt1).collect();
    let wt2: Vec<Option<f64>> = indicators.iter().map(|p| p.wt2).collect();
    let signals = detect_crossovers(&wt1, &wt2);
    let simulation = run_simulation(bars, &signals, initial_capital);

    Ok(PipelineResult {
        indicators,
        signals,
        simulation,
    })
}
