//! WaveTrend CLI — run the oscillator/backtest pipeline over bar CSVs.
//!
//! Commands:
//! - `run` — load one or more bar CSV files, run the pipeline per
//!   instrument (in parallel), print summaries, save artifacts
//! - `demo` — run the pipeline on a seeded synthetic random walk

mod export;
mod load;
mod synthetic;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;

use wavetrend_core::domain::Bar;
use wavetrend_core::indicators::WaveTrendParams;
use wavetrend_core::pipeline::{run_pipeline, PipelineResult};

use export::{save_artifacts, RunSummary};

#[derive(Parser)]
#[command(
    name = "wavetrend",
    about = "WaveTrend oscillator crossover backtesting pipeline"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline over one or more bar CSV files (one instrument each).
    Run {
        /// Bar CSV files (header: date,open,high,low,close,volume).
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Initial capital per instrument.
        #[arg(long, default_value_t = 10_000.0)]
        capital: f64,

        /// Output directory for artifact bundles.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,

        /// Print summaries only; write no artifact files.
        #[arg(long, default_value_t = false)]
        no_artifacts: bool,
    },
    /// Run the pipeline on a deterministic synthetic random walk.
    Demo {
        /// Number of daily bars to generate.
        #[arg(long, default_value_t = 500)]
        bars: usize,

        /// Random-walk seed.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Initial capital.
        #[arg(long, default_value_t = 10_000.0)]
        capital: f64,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            inputs,
            capital,
            output_dir,
            no_artifacts,
        } => run_cmd(inputs, capital, output_dir, no_artifacts),
        Commands::Demo { bars, seed, capital } => demo_cmd(bars, seed, capital),
    }
}

fn run_cmd(
    inputs: Vec<PathBuf>,
    capital: f64,
    output_dir: PathBuf,
    no_artifacts: bool,
) -> Result<()> {
    // One pipeline call per instrument; calls are independent, so fan out.
    let outcomes: Vec<(String, Result<RunSummary>)> = inputs
        .par_iter()
        .map(|path| {
            let name = load::instrument_name(path);
            let outcome = run_one(path, capital, &output_dir, no_artifacts);
            (name, outcome)
        })
        .collect();

    let mut failed = 0;
    for (name, outcome) in &outcomes {
        match outcome {
            Ok(summary) => print_summary(summary),
            Err(err) => {
                eprintln!("Error for {name}: {err:#}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn run_one(
    path: &Path,
    capital: f64,
    output_dir: &Path,
    no_artifacts: bool,
) -> Result<RunSummary> {
    let bars = load::load_bars_csv(path)?;
    let instrument = load::instrument_name(path);

    let result = run_pipeline(&bars, &WaveTrendParams::default(), capital)
        .with_context(|| format!("bar series contract violation in {}", path.display()))?;
    let summary = summarize(&instrument, &bars, &result, capital);

    if !no_artifacts {
        let run_dir = save_artifacts(
            &summary,
            &result.simulation.trades,
            &result.simulation.portfolio,
            output_dir,
        )?;
        log::info!("{instrument}: artifacts saved to {}", run_dir.display());
    }

    Ok(summary)
}

fn demo_cmd(bars: usize, seed: u64, capital: f64) -> Result<()> {
    let series = synthetic::synthetic_bars(bars, seed);
    log::info!("generated {} synthetic bars (seed {seed})", series.len());

    let result = run_pipeline(&series, &WaveTrendParams::default(), capital)
        .context("synthetic series failed the ordering contract")?;
    print_summary(&summarize("DEMO", &series, &result, capital));
    Ok(())
}

fn summarize(
    instrument: &str,
    bars: &[Bar],
    result: &PipelineResult,
    initial_capital: f64,
) -> RunSummary {
    RunSummary {
        instrument: instrument.to_string(),
        start_date: bars.first().map(|b| b.date),
        end_date: bars.last().map(|b| b.date),
        bar_count: bars.len(),
        buy_signals: result.signals.buy_count(),
        sell_signals: result.signals.sell_count(),
        trade_count: result.simulation.trades.len(),
        initial_capital,
        final_value: result.simulation.final_value,
        total_return: result.simulation.total_return(initial_capital),
    }
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!("=== WaveTrend Backtest ===");
    println!("Instrument:     {}", summary.instrument);
    match (summary.start_date, summary.end_date) {
        (Some(start), Some(end)) => println!("Period:         {start} to {end}"),
        _ => println!("Period:         (empty series)"),
    }
    println!("Bars:           {}", summary.bar_count);
    println!("Buy signals:    {}", summary.buy_signals);
    println!("Sell signals:   {}", summary.sell_signals);
    println!("Trades:         {}", summary.trade_count);
    println!();
    println!("--- Performance ---");
    println!("Initial:        {:.2}", summary.initial_capital);
    println!("Final Value:    {:.2}", summary.final_value);
    println!("Total Return:   {:.2}%", summary.total_return * 100.0);
    println!();
}
