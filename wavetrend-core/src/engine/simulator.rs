//! Single-position backtest simulator.
//!
//! Two states, Flat and Long. Per bar, in order: a Buy while Flat converts
//! all cash into shares at that bar's close; otherwise a Sell while Long
//! liquidates all shares at that bar's close; otherwise nothing. Every bar
//! then records a portfolio point — idle cash when Flat, mark-to-market
//! holdings when Long. Redundant signals (Buy while Long, Sell while Flat)
//! are no-ops; fills always happen at the signal bar's close.
//!
//! Signals must arrive in ascending bar order: each transition depends on
//! the state left by the previous one. The accumulator is explicit — no
//! state survives outside the `Simulator` value, and nothing is retained
//! after `finish`.
//!
//! The simulator does not validate prices or capital. A non-positive close
//! on a Buy, or non-positive initial capital, produces a degenerate but
//! well-defined run; rejecting such inputs is the caller's job.

use crate::domain::{Bar, PortfolioPoint, SimulationResult, Trade, TradeAction};
use crate::signals::CrossoverSignals;

/// Whether the simulator currently holds the instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionState {
    Flat,
    Long,
}

/// Explicit fold accumulator for one simulation run.
#[derive(Debug, Clone)]
pub struct Simulator {
    state: PositionState,
    cash: f64,
    shares: f64,
    trades: Vec<Trade>,
    portfolio: Vec<PortfolioPoint>,
    initial_capital: f64,
}

impl Simulator {
    pub fn new(initial_capital: f64) -> Self {
        Self {
            state: PositionState::Flat,
            cash: initial_capital,
            shares: 0.0,
            trades: Vec::new(),
            portfolio: Vec::new(),
            initial_capital,
        }
    }

    pub fn state(&self) -> PositionState {
        self.state
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn shares(&self) -> f64 {
        self.shares
    }

    /// Advance by one bar. Transition (at most one) first, then mark the
    /// portfolio at this bar's close.
    pub fn step(&mut self, bar: &Bar, buy: bool, sell: bool) {
        let price = bar.close;

        if self.state == PositionState::Flat && buy {
            self.shares = self.cash / price;
            self.cash = 0.0;
            self.state = PositionState::Long;
            self.trades.push(Trade {
                date: bar.date,
                action: TradeAction::Open,
                price,
                cash_value: self.shares * price,
            });
        } else if self.state == PositionState::Long && sell {
            self.cash = self.shares * price;
            self.shares = 0.0;
            self.state = PositionState::Flat;
            self.trades.push(Trade {
                date: bar.date,
                action: TradeAction::Close,
                price,
                cash_value: self.cash,
            });
        }

        let value = match self.state {
            PositionState::Flat => self.cash,
            PositionState::Long => self.shares * price,
        };
        self.portfolio.push(PortfolioPoint {
            date: bar.date,
            value,
        });
    }

    /// Consume the accumulator into the caller-owned result.
    pub fn finish(self) -> SimulationResult {
        let final_value = self
            .portfolio
            .last()
            .map_or(self.initial_capital, |point| point.value);
        SimulationResult {
            trades: self.trades,
            portfolio: self.portfolio,
            final_value,
        }
    }
}

/// Replay the signal sequence over the bar series in chronological order.
///
/// Empty input yields empty trade and portfolio sequences and
/// `final_value == initial_capital`.
pub fn run_simulation(
    bars: &[Bar],
    signals: &CrossoverSignals,
    initial_capital: f64,
) -> SimulationResult {
    assert_eq!(
        bars.len(),
        signals.len(),
        "signals must be index-aligned with bars"
    );

    let mut simulator = Simulator::new(initial_capital);
    for (i, bar) in bars.iter().enumerate() {
        simulator.step(bar, signals.buy[i], signals.sell[i]);
    }
    simulator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    fn signals_at(n: usize, buys: &[usize], sells: &[usize]) -> CrossoverSignals {
        let mut buy = vec![false; n];
        let mut sell = vec![false; n];
        for &i in buys {
            buy[i] = true;
        }
        for &i in sells {
            sell[i] = true;
        }
        CrossoverSignals { buy, sell }
    }

    #[test]
    fn empty_series_returns_initial_capital() {
        let result = run_simulation(&[], &signals_at(0, &[], &[]), 1000.0);
        assert!(result.trades.is_empty());
        assert!(result.portfolio.is_empty());
        assert_eq!(result.final_value, 1000.0);
    }

    #[test]
    fn no_signals_means_flat_cash_throughout() {
        let bars = make_bars(&[10.0, 12.0, 9.0]);
        let result = run_simulation(&bars, &signals_at(3, &[], &[]), 1000.0);
        assert!(result.trades.is_empty());
        assert_eq!(result.portfolio.len(), 3);
        assert!(result.portfolio.iter().all(|p| p.value == 1000.0));
        assert_eq!(result.final_value, 1000.0);
    }

    #[test]
    fn round_trip_ledger_values() {
        // Closes [10,10,10,12,15,11,9]: buy at index 3 (close 12), sell at
        // index 5 (close 11), flat through the last bar.
        let bars = make_bars(&[10.0, 10.0, 10.0, 12.0, 15.0, 11.0, 9.0]);
        let result = run_simulation(&bars, &signals_at(7, &[3], &[5]), 1000.0);

        assert_eq!(result.trades.len(), 2);
        let open = &result.trades[0];
        assert_eq!(open.action, TradeAction::Open);
        assert_eq!(open.date, bars[3].date);
        assert_eq!(open.price, 12.0);
        assert!((open.cash_value - 1000.0).abs() < 1e-9);

        let close = &result.trades[1];
        assert_eq!(close.action, TradeAction::Close);
        assert_eq!(close.date, bars[5].date);
        assert_eq!(close.price, 11.0);
        let shares = 1000.0 / 12.0; // 83.33
        assert!((close.cash_value - shares * 11.0).abs() < 1e-9);

        // Mark-to-market while long, realized cash after.
        assert_eq!(result.portfolio.len(), 7);
        assert!((result.portfolio[2].value - 1000.0).abs() < 1e-9);
        assert!((result.portfolio[3].value - 1000.0).abs() < 1e-9);
        assert!((result.portfolio[4].value - shares * 15.0).abs() < 1e-9);
        assert!((result.portfolio[5].value - shares * 11.0).abs() < 1e-9);
        assert!((result.portfolio[6].value - shares * 11.0).abs() < 1e-9);
        assert!((result.final_value - 916.0 - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn buy_while_long_is_ignored() {
        let bars = make_bars(&[10.0, 11.0, 12.0, 13.0]);
        let result = run_simulation(&bars, &signals_at(4, &[1, 2], &[]), 1000.0);
        assert_eq!(result.trades.len(), 1);
        assert_eq!(result.trades[0].date, bars[1].date);
    }

    #[test]
    fn sell_while_flat_is_ignored() {
        let bars = make_bars(&[10.0, 11.0, 12.0]);
        let result = run_simulation(&bars, &signals_at(3, &[], &[0, 2]), 1000.0);
        assert!(result.trades.is_empty());
        assert_eq!(result.final_value, 1000.0);
    }

    #[test]
    fn open_position_marks_to_market_through_last_bar() {
        let bars = make_bars(&[10.0, 20.0, 40.0]);
        let result = run_simulation(&bars, &signals_at(3, &[0], &[]), 1000.0);
        assert_eq!(result.trades.len(), 1);
        // 100 shares at 10, never closed.
        assert!((result.portfolio[0].value - 1000.0).abs() < 1e-9);
        assert!((result.portfolio[1].value - 2000.0).abs() < 1e-9);
        assert!((result.final_value - 4000.0).abs() < 1e-9);
    }

    #[test]
    fn state_invariants_hold_each_step() {
        let bars = make_bars(&[10.0, 11.0, 12.0, 11.0, 13.0, 12.0]);
        let signals = signals_at(6, &[1, 4], &[3]);
        let mut simulator = Simulator::new(1000.0);
        for (i, bar) in bars.iter().enumerate() {
            simulator.step(bar, signals.buy[i], signals.sell[i]);
            match simulator.state() {
                PositionState::Long => {
                    assert!(simulator.shares() > 0.0);
                    assert_eq!(simulator.cash(), 0.0);
                }
                PositionState::Flat => assert_eq!(simulator.shares(), 0.0),
            }
        }
    }

    #[test]
    fn simultaneous_buy_and_sell_takes_one_transition() {
        // Not producible by the crossover generator; the simulator still
        // must not open and close on the same bar.
        let bars = make_bars(&[10.0, 11.0]);
        let result = run_simulation(&bars, &signals_at(2, &[1], &[1]), 1000.0);
        assert_eq!(result.trades.len(), 1);
        assert_eq!(result.trades[0].action, TradeAction::Open);
    }

    #[test]
    fn zero_capital_passes_through() {
        let bars = make_bars(&[10.0, 11.0, 12.0]);
        let result = run_simulation(&bars, &signals_at(3, &[0], &[2]), 0.0);
        // Zero shares bought, zero proceeds; degenerate but well-defined.
        assert_eq!(result.trades.len(), 2);
        assert_eq!(result.final_value, 0.0);
    }
}
