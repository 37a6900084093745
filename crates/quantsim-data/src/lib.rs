//! Historical market data loading.
//!
//! Bars come from CSV files on disk: either one file for a single-symbol
//! run, or a directory holding one file per symbol.

mod csv_source;

pub use csv_source::load_bars;

use std::path::{Path, PathBuf};

use tracing::info;

use quantsim_core::{DataError, Dataset, SimulationError};

/// Load a validated dataset for the given symbols.
///
/// When `path` is a single file it supplies the first symbol's bars (or a
/// placeholder symbol when none is given). When it is a directory, each
/// symbol is resolved to a file inside it; a symbol with no matching file
/// fails the whole load.
pub fn load_dataset(path: &Path, symbols: &[String]) -> Result<Dataset, SimulationError> {
    if !path.exists() {
        return Err(DataError::NoDataAvailable(path.display().to_string()).into());
    }

    let mut bars_by_symbol = Vec::new();

    if path.is_file() {
        let symbol = symbols
            .first()
            .cloned()
            .unwrap_or_else(|| "DATA".to_string());
        let bars = load_bars(path)?;
        info!(symbol = %symbol, bars = bars.len(), file = %path.display(), "loaded bars");
        bars_by_symbol.push((symbol, bars));
    } else {
        for symbol in symbols {
            let file = find_symbol_file(path, symbol)
                .ok_or_else(|| DataError::SymbolNotFound(symbol.clone()))?;
            let bars = load_bars(&file)?;
            info!(symbol = %symbol, bars = bars.len(), file = %file.display(), "loaded bars");
            bars_by_symbol.push((symbol.clone(), bars));
        }
    }

    Ok(Dataset::from_symbol_bars(bars_by_symbol)?)
}

/// Resolve a symbol to a CSV file inside `dir`, trying the common naming
/// conventions in order.
fn find_symbol_file(dir: &Path, symbol: &str) -> Option<PathBuf> {
    let lower = symbol.to_lowercase();
    let candidates = [
        format!("{symbol}.csv"),
        format!("{lower}.csv"),
        format!("{symbol}_daily.csv"),
        format!("{lower}_daily.csv"),
    ];
    candidates
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.is_file())
}
