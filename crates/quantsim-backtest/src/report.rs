//! Backtest report generation.

use chrono::DateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use quantsim_core::{EquityPoint, Fill};

use crate::engine::{BacktestConfig, BacktestRun, Termination};
use crate::metrics::{self, PerformanceSummary};

/// Complete report of one finished run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestReport {
    /// How the run ended
    pub termination: Termination,
    /// Starting capital
    pub initial_capital: Decimal,
    /// Final equity point, absent when no step was completed
    pub final_equity: Option<Decimal>,
    /// How many times a buy drove the cash balance negative
    pub cash_depletions: u32,
    /// Summary statistics
    pub summary: PerformanceSummary,
    /// Recorded equity per completed step
    pub equity_curve: Vec<EquityPoint>,
    /// Executed fills, in execution order
    pub trades: Vec<Fill>,
}

impl BacktestReport {
    /// Build a report from a finished run.
    pub fn from_run(run: &BacktestRun, config: &BacktestConfig) -> Self {
        let curve = run.ledger.equity_curve();
        let summary = metrics::performance_summary(
            curve,
            config.risk_free_rate,
            config.periods_per_year,
            run.ledger.trades().len(),
        );
        Self {
            termination: run.termination.clone(),
            initial_capital: run.ledger.initial_capital(),
            final_equity: curve.last().map(|p| p.value),
            cash_depletions: run.ledger.cash_depletions(),
            summary,
            equity_curve: curve.to_vec(),
            trades: run.ledger.trades().to_vec(),
        }
    }

    /// Generate a text summary.
    pub fn summary_text(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str("                     BACKTEST REPORT                        \n");
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        s.push_str("RUN\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        match &self.termination {
            Termination::Completed => s.push_str("  Status:              completed\n"),
            Termination::Aborted { timestamp, reason } => {
                s.push_str(&format!(
                    "  Status:              aborted at {} ({})\n",
                    fmt_date(*timestamp),
                    reason
                ));
            }
        }
        if let (Some(first), Some(last)) = (self.equity_curve.first(), self.equity_curve.last()) {
            s.push_str(&format!(
                "  Period:              {} to {}\n",
                fmt_date(first.timestamp),
                fmt_date(last.timestamp)
            ));
        }
        s.push_str(&format!(
            "  Steps Recorded:      {}\n",
            self.equity_curve.len()
        ));
        s.push('\n');

        s.push_str("PERFORMANCE\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!(
            "  Initial Capital:     ${:.2}\n",
            self.initial_capital
        ));
        match self.final_equity {
            Some(equity) => s.push_str(&format!("  Final Equity:        ${:.2}\n", equity)),
            None => s.push_str("  Final Equity:        n/a\n"),
        }
        s.push_str(&format!(
            "  Total Return:        {}\n",
            fmt_pct(self.summary.total_return_pct)
        ));
        s.push_str(&format!(
            "  Annualized Return:   {}\n",
            fmt_pct(self.summary.annualized_return_pct)
        ));
        s.push_str(&format!(
            "  Max Drawdown:        {}\n",
            fmt_pct(self.summary.max_drawdown_pct)
        ));
        s.push('\n');

        s.push_str("RISK METRICS\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!(
            "  Sharpe Ratio:        {}\n",
            fmt_ratio(self.summary.sharpe_ratio)
        ));
        s.push_str(&format!(
            "  Annualized Vol:      {}\n",
            fmt_pct(self.summary.annualized_volatility_pct)
        ));
        s.push('\n');

        s.push_str("TRADE STATISTICS\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!(
            "  Total Trades:        {}\n",
            self.summary.trade_count
        ));
        s.push_str(&format!(
            "  Winning Periods:     {}\n",
            fmt_pct(self.summary.winning_periods_pct)
        ));
        s.push_str(&format!(
            "  Losing Periods:      {}\n",
            fmt_pct(self.summary.losing_periods_pct)
        ));
        s.push_str(&format!(
            "  Cash Depletions:     {}\n",
            self.cash_depletions
        ));
        s.push('\n');

        s.push_str("═══════════════════════════════════════════════════════════\n");

        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV (equity curve only).
    pub fn equity_to_csv(&self) -> String {
        let mut csv = String::from("timestamp,equity\n");
        for point in &self.equity_curve {
            csv.push_str(&format!("{},{}\n", point.timestamp, point.value));
        }
        csv
    }
}

fn fmt_date(timestamp: i64) -> String {
    DateTime::from_timestamp_millis(timestamp)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

fn fmt_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v),
        None => "n/a".to_string(),
    }
}

fn fmt_ratio(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "n/a".to_string(),
    }
}
