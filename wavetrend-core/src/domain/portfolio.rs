//! Portfolio valuation series and the bundled simulation result.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::trade::Trade;

/// Portfolio value at one bar close: idle cash when flat, mark-to-market
/// holdings value when in position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Everything the simulator produces for one run. The simulator retains no
/// state after returning this; the caller owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub trades: Vec<Trade>,
    /// One point per bar, index-aligned with the input series.
    pub portfolio: Vec<PortfolioPoint>,
    /// Last portfolio value, or the untouched initial capital on empty input.
    pub final_value: f64,
}

impl SimulationResult {
    /// Fractional return over the run. Zero when capital is zero (degenerate
    /// input passes through rather than dividing by zero).
    pub fn total_return(&self, initial_capital: f64) -> f64 {
        if initial_capital == 0.0 {
            return 0.0;
        }
        (self.final_value - initial_capital) / initial_capital
    }
}
