//! OHLCV bar type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV observation for one symbol at one timestamp.
///
/// Timestamps are Unix milliseconds. Bars are immutable once produced by
/// the data source; the symbol lives in the [`Dataset`](super::Dataset)
/// index, not in the bar itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Trading volume
    pub volume: f64,
}

impl Bar {
    /// Create a new bar.
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Get the timestamp as a DateTime.
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }

    /// All OHLCV fields are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
            && self.volume.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_datetime() {
        let bar = Bar::new(86_400_000, 100.0, 110.0, 95.0, 105.0, 1000.0);
        assert_eq!(bar.datetime().timestamp_millis(), 86_400_000);
    }

    #[test]
    fn test_bar_finiteness() {
        let bar = Bar::new(0, 100.0, 110.0, 95.0, 105.0, 1000.0);
        assert!(bar.is_finite());

        let bad = Bar::new(0, 100.0, f64::NAN, 95.0, 105.0, 1000.0);
        assert!(!bad.is_finite());
    }
}
