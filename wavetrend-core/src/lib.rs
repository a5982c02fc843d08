//! WaveTrend Core — indicator computation, signal generation, and backtest
//! simulation for a single instrument's bar series.
//!
//! The pipeline is pure and strictly forward:
//! - Domain types (bars, trades, portfolio valuation)
//! - Smoothing primitives (recursive EMA, trailing SMA) over optional values
//! - Indicator engine (WaveTrend oscillator pair + Awesome Oscillator)
//! - Crossover signal generator
//! - Single-position backtest simulator (Flat/Long state machine)
//! - Orchestrator composing the stages into one call
//!
//! No I/O, no retained state between invocations, no internal concurrency.
//! Callers supply an ordered bar series and own every derived output.

pub mod domain;
pub mod engine;
pub mod indicators;
pub mod pipeline;
pub mod signals;
