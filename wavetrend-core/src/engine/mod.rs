//! Backtest engine — a single-position state machine replaying signals
//! through the bar series in chronological order.

pub mod simulator;

pub use simulator::{run_simulation, PositionState, Simulator};
