//! Trade — one ledger entry produced by the backtest simulator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// What a ledger entry did to the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeAction {
    /// All available cash converted into shares.
    Open,
    /// All held shares liquidated back into cash.
    Close,
}

/// One fill in the trade ledger.
///
/// Created only by the simulator, append-only, ordered by date. Opens and
/// Closes alternate strictly. `cash_value` is the full amount committed
/// (shares × price on open, proceeds on close).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub date: NaiveDate,
    pub action: TradeAction,
    pub price: f64,
    pub cash_value: f64,
}

impl Trade {
    pub fn is_open(&self) -> bool {
        self.action == TradeAction::Open
    }
}
