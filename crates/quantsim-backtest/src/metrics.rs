//! Performance metrics over a finished equity curve.
//!
//! All functions are pure and stateless; statistics are computed in `f64`.
//! Equity values of exactly zero are treated as missing and dropped before
//! computing returns. That is a documented approximation to avoid division
//! by zero, not a bug to fix.

use quantsim_core::EquityPoint;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

const DAYS_PER_YEAR: f64 = 365.25;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Period-over-period percentage change.
///
/// The first point has no predecessor, so the output is one element shorter
/// than the input.
pub fn returns(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| (w[1] - w[0]) / w[0]).collect()
}

/// Drawdown from the running maximum at every point; always <= 0.
pub fn drawdowns(values: &[f64]) -> Vec<f64> {
    let mut peak = f64::NEG_INFINITY;
    values
        .iter()
        .map(|&v| {
            if v > peak {
                peak = v;
            }
            v / peak - 1.0
        })
        .collect()
}

/// Annualized Sharpe ratio.
///
/// The annual risk-free rate is converted to a per-period rate by
/// compounding when `risk_free_rate > -1`, else by a linear approximation.
/// Returns `None` when the return series is empty or its sample standard
/// deviation is zero or undefined.
pub fn sharpe_ratio(returns: &[f64], risk_free_rate: f64, periods_per_year: f64) -> Option<f64> {
    if returns.is_empty() {
        return None;
    }

    let period_rate = if risk_free_rate > -1.0 {
        (1.0 + risk_free_rate).powf(1.0 / periods_per_year) - 1.0
    } else {
        risk_free_rate / periods_per_year
    };

    let mean_excess =
        returns.iter().map(|r| r - period_rate).sum::<f64>() / returns.len() as f64;
    let std = sample_stdev(returns)?;
    if std == 0.0 || !std.is_finite() {
        return None;
    }
    Some(mean_excess / std * periods_per_year.sqrt())
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (ddof = 1); `None` below two observations.
fn sample_stdev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

/// Summary statistics of one finished run.
///
/// Fields are `None` ("no value") on degenerate input (fewer than two
/// non-zero equity points), except the trade count, which is always the
/// supplied count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub total_return_pct: Option<f64>,
    pub annualized_return_pct: Option<f64>,
    pub annualized_volatility_pct: Option<f64>,
    pub sharpe_ratio: Option<f64>,
    pub max_drawdown_pct: Option<f64>,
    pub winning_periods_pct: Option<f64>,
    pub losing_periods_pct: Option<f64>,
    pub trade_count: usize,
}

impl PerformanceSummary {
    fn no_value(trade_count: usize) -> Self {
        Self {
            total_return_pct: None,
            annualized_return_pct: None,
            annualized_volatility_pct: None,
            sharpe_ratio: None,
            max_drawdown_pct: None,
            winning_periods_pct: None,
            losing_periods_pct: None,
            trade_count,
        }
    }
}

/// Compute the full performance summary of an equity curve.
///
/// Annualized return compounds the total return over the elapsed
/// calendar-day span divided by 365.25; it is `None` when the span is not
/// positive.
pub fn performance_summary(
    curve: &[EquityPoint],
    risk_free_rate: f64,
    periods_per_year: f64,
    trade_count: usize,
) -> PerformanceSummary {
    // zero equity values are treated as missing
    let points: Vec<(i64, f64)> = curve
        .iter()
        .filter_map(|p| p.value.to_f64().map(|v| (p.timestamp, v)))
        .filter(|(_, v)| *v != 0.0)
        .collect();

    if points.len() < 2 {
        return PerformanceSummary::no_value(trade_count);
    }

    let values: Vec<f64> = points.iter().map(|(_, v)| *v).collect();
    let rets = returns(&values);
    if rets.is_empty() {
        return PerformanceSummary::no_value(trade_count);
    }

    let total_return_pct = (values[values.len() - 1] / values[0] - 1.0) * 100.0;

    let span_days = (points[points.len() - 1].0 - points[0].0) as f64 / MILLIS_PER_DAY;
    let annualized_return_pct = if span_days > 0.0 {
        let years = span_days / DAYS_PER_YEAR;
        Some(((1.0 + total_return_pct / 100.0).powf(1.0 / years) - 1.0) * 100.0)
    } else {
        None
    };

    let annualized_volatility_pct =
        sample_stdev(&rets).map(|s| s * periods_per_year.sqrt() * 100.0);

    let max_drawdown_pct = drawdowns(&values)
        .into_iter()
        .fold(f64::INFINITY, f64::min);

    let period_count = rets.len() as f64;
    let winning = rets.iter().filter(|r| **r > 0.0).count() as f64;
    let losing = rets.iter().filter(|r| **r < 0.0).count() as f64;

    PerformanceSummary {
        total_return_pct: Some(total_return_pct),
        annualized_return_pct,
        annualized_volatility_pct,
        sharpe_ratio: sharpe_ratio(&rets, risk_free_rate, periods_per_year),
        max_drawdown_pct: Some(max_drawdown_pct * 100.0),
        winning_periods_pct: Some(winning / period_count * 100.0),
        losing_periods_pct: Some(losing / period_count * 100.0),
        trade_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    const DAY_MS: i64 = 86_400_000;

    fn curve(values: &[f64]) -> Vec<EquityPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| EquityPoint {
                timestamp: i as i64 * DAY_MS,
                value: Decimal::try_from(v).unwrap(),
            })
            .collect()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_returns_drops_first_point() {
        let rets = returns(&[100.0, 110.0, 99.0]);
        assert_eq!(rets.len(), 2);
        assert!(close(rets[0], 0.10));
        assert!(close(rets[1], -0.10));
    }

    #[test]
    fn test_drawdowns_never_positive() {
        let dds = drawdowns(&[100.0, 120.0, 90.0, 95.0, 130.0]);
        assert!(dds.iter().all(|d| *d <= 0.0));
        assert!(close(dds[0], 0.0));
        assert!(close(dds[2], 90.0 / 120.0 - 1.0));
        assert!(close(dds[4], 0.0));
    }

    #[test]
    fn test_sharpe_none_on_degenerate_series() {
        assert!(sharpe_ratio(&[], 0.0, 252.0).is_none());
        // constant returns: zero sample stdev
        assert!(sharpe_ratio(&[0.01, 0.01, 0.01], 0.0, 252.0).is_none());
        // single return: stdev undefined
        assert!(sharpe_ratio(&[0.01], 0.0, 252.0).is_none());
    }

    #[test]
    fn test_sharpe_with_zero_risk_free() {
        let rets = [0.01, -0.005, 0.02, 0.0];
        let sharpe = sharpe_ratio(&rets, 0.0, 252.0).unwrap();
        let m = rets.iter().sum::<f64>() / rets.len() as f64;
        let std = sample_stdev(&rets).unwrap();
        assert!(close(sharpe, m / std * 252.0_f64.sqrt()));
    }

    #[test]
    fn test_sharpe_compounds_risk_free_rate() {
        let rets = [0.01, -0.005, 0.02, 0.0];
        let with_rf = sharpe_ratio(&rets, 0.05, 252.0).unwrap();
        let without = sharpe_ratio(&rets, 0.0, 252.0).unwrap();
        // a positive risk-free rate lowers the excess return
        assert!(with_rf < without);
    }

    #[test]
    fn test_summary_happy_path() {
        let summary = performance_summary(&curve(&[100.0, 110.0, 105.0, 120.0]), 0.0, 252.0, 7);

        assert!(close(summary.total_return_pct.unwrap(), 20.0));
        assert_eq!(summary.trade_count, 7);
        // one losing period out of three
        assert!(close(summary.winning_periods_pct.unwrap(), 200.0 / 3.0));
        assert!(close(summary.losing_periods_pct.unwrap(), 100.0 / 3.0));
        assert!(close(
            summary.max_drawdown_pct.unwrap(),
            (105.0 / 110.0 - 1.0) * 100.0
        ));
        assert!(summary.annualized_return_pct.is_some());
        assert!(summary.annualized_volatility_pct.is_some());
        assert!(summary.sharpe_ratio.is_some());
    }

    #[test]
    fn test_summary_degenerate_inputs() {
        // single point
        let summary = performance_summary(&curve(&[100.0]), 0.0, 252.0, 3);
        assert_eq!(summary, PerformanceSummary::no_value(3));

        // all-zero values are dropped as missing
        let summary = performance_summary(&curve(&[0.0, 0.0, 0.0]), 0.0, 252.0, 0);
        assert_eq!(summary, PerformanceSummary::no_value(0));

        // empty curve
        let summary = performance_summary(&[], 0.0, 252.0, 2);
        assert_eq!(summary, PerformanceSummary::no_value(2));
    }

    #[test]
    fn test_summary_zero_values_dropped_not_divided() {
        // the zero in the middle is dropped, leaving a clean two-point curve
        let summary = performance_summary(&curve(&[100.0, 0.0, 110.0]), 0.0, 252.0, 1);
        assert!(close(summary.total_return_pct.unwrap(), 10.0));
    }

    #[test]
    fn test_summary_zero_span_has_no_annualized_return() {
        let points = vec![
            EquityPoint {
                timestamp: 1000,
                value: dec!(100),
            },
            EquityPoint {
                timestamp: 1000,
                value: dec!(110),
            },
        ];
        let summary = performance_summary(&points, 0.0, 252.0, 0);
        assert!(summary.total_return_pct.is_some());
        assert!(summary.annualized_return_pct.is_none());
    }

    #[test]
    fn test_summary_is_idempotent() {
        let c = curve(&[100.0, 101.5, 99.75, 103.2, 102.0]);
        let first = performance_summary(&c, 0.02, 252.0, 4);
        let second = performance_summary(&c, 0.02, 252.0, 4);
        assert_eq!(first, second);
    }
}
