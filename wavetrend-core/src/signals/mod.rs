//! Discrete buy/sell events derived from oscillator-line crossovers.

pub mod crossover;

pub use crossover::{detect_crossovers, CrossoverSignals, SignalKind};
