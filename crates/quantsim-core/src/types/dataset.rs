//! Time-indexed bar collection for one or more symbols.

use std::collections::BTreeMap;

use crate::error::DatasetError;

use super::Bar;

/// All symbols' bars for a single time step.
///
/// Typed accessors replace the dynamic per-row lookups of ad-hoc tabular
/// slicing: a strategy asks for its symbol's bar by key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepBars {
    bars: BTreeMap<String, Bar>,
}

impl StepBars {
    /// Get the bar for a symbol at this step, if present.
    pub fn get(&self, symbol: &str) -> Option<&Bar> {
        self.bars.get(symbol)
    }

    /// Closing price for a symbol at this step, if present.
    pub fn close(&self, symbol: &str) -> Option<f64> {
        self.bars.get(symbol).map(|b| b.close)
    }

    /// Symbols present at this step, in lexical order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.bars.keys().map(String::as_str)
    }

    /// Iterate over (symbol, bar) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Bar)> {
        self.bars.iter().map(|(s, b)| (s.as_str(), b))
    }

    /// Number of symbols present at this step.
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Check whether the step carries no bars.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    fn insert(&mut self, symbol: String, bar: Bar) -> Option<Bar> {
        self.bars.insert(symbol, bar)
    }
}

impl FromIterator<(String, Bar)> for StepBars {
    fn from_iter<I: IntoIterator<Item = (String, Bar)>>(iter: I) -> Self {
        Self {
            bars: iter.into_iter().collect(),
        }
    }
}

/// An ordered sequence of bars keyed by (timestamp, symbol).
///
/// Construction validates the dataset contract: non-empty, no duplicate
/// (timestamp, symbol) pairs, all OHLCV fields finite. Iteration visits
/// each distinct timestamp exactly once, in ascending order, with all
/// symbols' bars for that timestamp delivered together.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    steps: BTreeMap<i64, StepBars>,
    bar_count: usize,
}

impl Dataset {
    /// Build a dataset from per-symbol bar vectors.
    pub fn from_symbol_bars<I>(bars_by_symbol: I) -> Result<Self, DatasetError>
    where
        I: IntoIterator<Item = (String, Vec<Bar>)>,
    {
        let mut steps: BTreeMap<i64, StepBars> = BTreeMap::new();
        let mut bar_count = 0;

        for (symbol, bars) in bars_by_symbol {
            for bar in bars {
                if !bar.is_finite() {
                    return Err(DatasetError::NonFinite {
                        symbol,
                        timestamp: bar.timestamp,
                    });
                }
                let step = steps.entry(bar.timestamp).or_default();
                if step.insert(symbol.clone(), bar).is_some() {
                    return Err(DatasetError::DuplicateBar {
                        symbol,
                        timestamp: bar.timestamp,
                    });
                }
                bar_count += 1;
            }
        }

        if steps.is_empty() {
            return Err(DatasetError::Empty);
        }

        Ok(Self { steps, bar_count })
    }

    /// Number of distinct time steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check whether the dataset holds no bars.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Total number of bars across all steps.
    pub fn bar_count(&self) -> usize {
        self.bar_count
    }

    /// Distinct timestamps in ascending order.
    pub fn timestamps(&self) -> impl Iterator<Item = i64> + '_ {
        self.steps.keys().copied()
    }

    /// Iterate the steps in ascending timestamp order.
    pub fn steps(&self) -> impl Iterator<Item = (i64, &StepBars)> {
        self.steps.iter().map(|(&ts, step)| (ts, step))
    }

    /// First timestamp, if any.
    pub fn first_timestamp(&self) -> Option<i64> {
        self.steps.keys().next().copied()
    }

    /// Last timestamp, if any.
    pub fn last_timestamp(&self) -> Option<i64> {
        self.steps.keys().next_back().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(ts: i64, close: f64) -> Bar {
        Bar::new(ts, close, close + 1.0, close - 1.0, close, 1000.0)
    }

    #[test]
    fn test_steps_sorted_and_grouped() {
        // Bars supplied out of order end up sorted by timestamp, with both
        // symbols' bars delivered at the same step.
        let dataset = Dataset::from_symbol_bars([
            ("AAPL".to_string(), vec![bar(2000, 101.0), bar(1000, 100.0)]),
            ("MSFT".to_string(), vec![bar(1000, 300.0), bar(2000, 301.0)]),
        ])
        .unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.bar_count(), 4);

        let timestamps: Vec<i64> = dataset.timestamps().collect();
        assert_eq!(timestamps, vec![1000, 2000]);

        let (ts, step) = dataset.steps().next().unwrap();
        assert_eq!(ts, 1000);
        assert_eq!(step.len(), 2);
        assert_eq!(step.close("AAPL"), Some(100.0));
        assert_eq!(step.close("MSFT"), Some(300.0));
    }

    #[test]
    fn test_duplicate_bar_rejected() {
        let result = Dataset::from_symbol_bars([(
            "AAPL".to_string(),
            vec![bar(1000, 100.0), bar(1000, 101.0)],
        )]);

        assert_eq!(
            result.unwrap_err(),
            DatasetError::DuplicateBar {
                symbol: "AAPL".to_string(),
                timestamp: 1000
            }
        );
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut b = bar(1000, 100.0);
        b.volume = f64::INFINITY;
        let result = Dataset::from_symbol_bars([("AAPL".to_string(), vec![b])]);
        assert!(matches!(result, Err(DatasetError::NonFinite { .. })));
    }

    #[test]
    fn test_empty_rejected() {
        let result = Dataset::from_symbol_bars(Vec::<(String, Vec<Bar>)>::new());
        assert_eq!(result.unwrap_err(), DatasetError::Empty);

        let result = Dataset::from_symbol_bars([("AAPL".to_string(), vec![])]);
        assert_eq!(result.unwrap_err(), DatasetError::Empty);
    }

    #[test]
    fn test_symbol_missing_at_step() {
        let dataset = Dataset::from_symbol_bars([
            ("AAPL".to_string(), vec![bar(1000, 100.0), bar(2000, 101.0)]),
            ("MSFT".to_string(), vec![bar(2000, 300.0)]),
        ])
        .unwrap();

        let (_, first) = dataset.steps().next().unwrap();
        assert!(first.get("MSFT").is_none());
        assert_eq!(first.len(), 1);
    }
}
