//! Artifact export — trade ledger and portfolio curve as CSV, run summary
//! as JSON, bundled into a per-run directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use wavetrend_core::domain::{PortfolioPoint, Trade, TradeAction};

/// Caller-facing run summary, serialized to `summary.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub instrument: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub bar_count: usize,
    pub buy_signals: usize,
    pub sell_signals: usize,
    pub trade_count: usize,
    pub initial_capital: f64,
    pub final_value: f64,
    pub total_return: f64,
}

/// Export the trade ledger as CSV: `date,action,price,cash_value`.
pub fn export_trades_csv(trades: &[Trade]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["date", "action", "price", "cash_value"])?;
    for trade in trades {
        let action = match trade.action {
            TradeAction::Open => "Open",
            TradeAction::Close => "Close",
        };
        wtr.write_record([
            trade.date.to_string(),
            action.to_string(),
            format!("{:.4}", trade.price),
            format!("{:.2}", trade.cash_value),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Export the portfolio curve as CSV: `date,value`.
pub fn export_portfolio_csv(portfolio: &[PortfolioPoint]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["date", "value"])?;
    for point in portfolio {
        wtr.write_record([point.date.to_string(), format!("{:.2}", point.value)])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Serialize a `RunSummary` to pretty JSON.
pub fn export_summary_json(summary: &RunSummary) -> Result<String> {
    serde_json::to_string_pretty(summary).context("failed to serialize run summary")
}

/// Save the artifact set for one run.
///
/// Creates `{instrument}_{timestamp}/` under `output_dir` containing
/// `summary.json`, `trades.csv`, and `portfolio.csv`. Returns the created
/// directory.
pub fn save_artifacts(
    summary: &RunSummary,
    trades: &[Trade],
    portfolio: &[PortfolioPoint],
    output_dir: &Path,
) -> Result<PathBuf> {
    let dirname = format!(
        "{}_{}",
        summary.instrument,
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    );
    let run_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    std::fs::write(run_dir.join("summary.json"), export_summary_json(summary)?)?;
    std::fs::write(run_dir.join("trades.csv"), export_trades_csv(trades)?)?;
    std::fs::write(run_dir.join("portfolio.csv"), export_portfolio_csv(portfolio)?)?;

    Ok(run_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_summary() -> RunSummary {
        RunSummary {
            instrument: "SPY".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 2),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 28),
            bar_count: 124,
            buy_signals: 6,
            sell_signals: 5,
            trade_count: 11,
            initial_capital: 10_000.0,
            final_value: 11_250.0,
            total_return: 0.125,
        }
    }

    fn sample_trades() -> Vec<Trade> {
        vec![
            Trade {
                date: NaiveDate::from_ymd_opt(2024, 2, 5).unwrap(),
                action: TradeAction::Open,
                price: 480.1234,
                cash_value: 10_000.0,
            },
            Trade {
                date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                action: TradeAction::Close,
                price: 495.5,
                cash_value: 10_320.25,
            },
        ]
    }

    #[test]
    fn trades_csv_content() {
        let csv = export_trades_csv(&sample_trades()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "date,action,price,cash_value");
        assert_eq!(lines[1], "2024-02-05,Open,480.1234,10000.00");
        assert_eq!(lines[2], "2024-03-01,Close,495.5000,10320.25");
    }

    #[test]
    fn trades_csv_empty_has_header_only() {
        let csv = export_trades_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn portfolio_csv_content() {
        let portfolio = vec![
            PortfolioPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                value: 10_000.0,
            },
            PortfolioPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
                value: 10_123.456,
            },
        ];
        let csv = export_portfolio_csv(&portfolio).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "date,value");
        assert_eq!(lines[1], "2024-01-02,10000.00");
        assert_eq!(lines[2], "2024-01-03,10123.46");
    }

    #[test]
    fn summary_json_roundtrip() {
        let summary = sample_summary();
        let json = export_summary_json(&summary).unwrap();
        let restored: RunSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.instrument, summary.instrument);
        assert_eq!(restored.bar_count, summary.bar_count);
        assert!((restored.total_return - summary.total_return).abs() < 1e-12);
    }

    #[test]
    fn save_artifacts_creates_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let run_dir = save_artifacts(
            &sample_summary(),
            &sample_trades(),
            &[PortfolioPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                value: 10_000.0,
            }],
            dir.path(),
        )
        .unwrap();

        assert!(run_dir.join("summary.json").exists());
        assert!(run_dir.join("trades.csv").exists());
        assert!(run_dir.join("portfolio.csv").exists());
    }
}
