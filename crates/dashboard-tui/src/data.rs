use std::fs;
use std::path::{Path, PathBuf};

use dashboard_core::{
    parse_financials, parse_prices, parse_symbols, DataError, FinancialRecord, PriceRecord,
    StockRecord,
};

/// On-disk layout of the backend's per-symbol exports:
///
/// ```text
/// <root>/symbols.json
/// <root>/<SYMBOL>/prices.json
/// <root>/<SYMBOL>/financials.json
/// ```
///
/// Missing or malformed files degrade to empty lists; the dashboard then
/// renders empty charts instead of failing.
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `DASHBOARD_DATA_DIR`, defaulting to `./data`.
    pub fn from_env() -> Self {
        let root = std::env::var("DASHBOARD_DATA_DIR").unwrap_or_else(|_| "data".to_string());
        Self::new(root)
    }

    pub fn load_symbols(&self) -> Vec<StockRecord> {
        load_list(&self.root.join("symbols.json"), parse_symbols)
    }

    pub fn load_prices(&self, symbol: &str) -> Vec<PriceRecord> {
        load_list(&self.root.join(symbol).join("prices.json"), parse_prices)
    }

    pub fn load_financials(&self, symbol: &str) -> Vec<FinancialRecord> {
        load_list(&self.root.join(symbol).join("financials.json"), parse_financials)
    }
}

fn load_list<T>(path: &Path, parse: fn(&str) -> Result<Vec<T>, DataError>) -> Vec<T> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "data file unreadable, using empty list");
            return Vec::new();
        }
    };
    match parse(&json) {
        Ok(records) => records,
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "data file malformed, using empty list");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("dashboard-tui-test-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_files_degrade_to_empty() {
        let data = DataDir::new(scratch_dir("missing"));
        assert!(data.load_symbols().is_empty());
        assert!(data.load_prices("AAPL").is_empty());
        assert!(data.load_financials("AAPL").is_empty());
    }

    #[test]
    fn malformed_json_degrades_to_empty() {
        let root = scratch_dir("malformed");
        fs::write(root.join("symbols.json"), "{ not json").unwrap();
        let data = DataDir::new(root);
        assert!(data.load_symbols().is_empty());
    }

    #[test]
    fn well_formed_files_load() {
        let root = scratch_dir("ok");
        fs::write(
            root.join("symbols.json"),
            r#"[{"symbol": "AAPL", "title": "Apple Inc.", "industry": "Consumer Electronics"}]"#,
        )
        .unwrap();
        fs::create_dir_all(root.join("AAPL")).unwrap();
        fs::write(
            root.join("AAPL").join("prices.json"),
            r#"[{"date": "2024-01-02", "adj_close": 185.5}]"#,
        )
        .unwrap();

        let data = DataDir::new(root);
        assert_eq!(data.load_symbols().len(), 1);
        assert_eq!(data.load_prices("AAPL").len(), 1);
    }
}
