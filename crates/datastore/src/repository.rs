use crate::error::StoreError;
use configuration::DataSettings;
use core_types::{EquityPoint, PriceRecord, ReturnRecord, VariantMetrics};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// The `CsvStore` provides a high-level, application-specific interface to
/// the persisted datasets. It encapsulates all CSV access and the layout of
/// the data directory; the rest of the application only ever sees typed rows.
///
/// Each table is rewritten whole on save. Outputs are never deleted on a
/// failed run, so a consumer that polls the directory only ever observes
/// complete tables.
#[derive(Debug, Clone)]
pub struct CsvStore {
    prices_path: PathBuf,
    returns_path: PathBuf,
    equity_path: PathBuf,
    metrics_path: PathBuf,
}

impl CsvStore {
    pub fn new(settings: &DataSettings) -> Self {
        Self {
            prices_path: settings.dir.join(&settings.price_file),
            returns_path: settings.dir.join(&settings.returns_file),
            equity_path: settings.dir.join(&settings.equity_file),
            metrics_path: settings.dir.join(&settings.metrics_file),
        }
    }

    /// Persists the aligned price snapshot produced by the fetch stage.
    pub fn save_price_history(&self, rows: &[PriceRecord]) -> Result<(), StoreError> {
        self.write_table(&self.prices_path, rows)
    }

    /// Loads the aligned price snapshot the backtester consumes.
    pub fn load_price_history(&self) -> Result<Vec<PriceRecord>, StoreError> {
        self.read_table(&self.prices_path)
    }

    /// Persists the trimmed return series produced by the backtester.
    pub fn save_returns(&self, rows: &[ReturnRecord]) -> Result<(), StoreError> {
        self.write_table(&self.returns_path, rows)
    }

    /// Loads the return series the analytics stage consumes.
    pub fn load_returns(&self) -> Result<Vec<ReturnRecord>, StoreError> {
        self.read_table(&self.returns_path)
    }

    /// Persists the three equity curves for the dashboard.
    pub fn save_equity_curve(&self, rows: &[EquityPoint]) -> Result<(), StoreError> {
        self.write_table(&self.equity_path, rows)
    }

    /// Persists the per-variant metrics table for the dashboard.
    pub fn save_metrics(&self, rows: &[VariantMetrics]) -> Result<(), StoreError> {
        self.write_table(&self.metrics_path, rows)
    }

    fn write_table<T: Serialize>(&self, path: &Path, rows: &[T]) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = csv::Writer::from_path(path)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        tracing::info!(path = %path.display(), rows = rows.len(), "dataset saved");
        Ok(())
    }

    fn read_table<T: DeserializeOwned>(&self, path: &Path) -> Result<Vec<T>, StoreError> {
        if !path.exists() {
            return Err(StoreError::InputNotFound(path.to_path_buf()));
        }
        let mut reader = csv::Reader::from_path(path)?;
        let rows = reader
            .deserialize()
            .collect::<Result<Vec<T>, csv::Error>>()?;
        tracing::debug!(path = %path.display(), rows = rows.len(), "dataset loaded");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn store_in(dir: &Path) -> CsvStore {
        CsvStore::new(&DataSettings {
            dir: dir.to_path_buf(),
            price_file: "prices.csv".to_string(),
            returns_file: "returns.csv".to_string(),
            equity_file: "equity.csv".to_string(),
            metrics_file: "metrics.csv".to_string(),
        })
    }

    #[test]
    fn price_history_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        let rows = vec![
            PriceRecord {
                date: "2024-01-02".parse().unwrap(),
                asset_close: dec!(100.5),
                benchmark_close: dec!(4742.83),
            },
            PriceRecord {
                date: "2024-01-03".parse().unwrap(),
                asset_close: dec!(101.25),
                benchmark_close: dec!(4704.81),
            },
        ];
        store.save_price_history(&rows).unwrap();

        assert_eq!(store.load_price_history().unwrap(), rows);
    }

    #[test]
    fn returns_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        let rows = vec![ReturnRecord {
            date: "2024-02-15".parse().unwrap(),
            asset_return: dec!(0.0125),
            benchmark_return: dec!(-0.004),
            strategy_return: dec!(0),
        }];
        store.save_returns(&rows).unwrap();

        assert_eq!(store.load_returns().unwrap(), rows);
    }

    #[test]
    fn missing_input_is_reported_not_panicked() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        assert!(matches!(
            store.load_price_history(),
            Err(StoreError::InputNotFound(_))
        ));
        assert!(matches!(
            store.load_returns(),
            Err(StoreError::InputNotFound(_))
        ));
    }
}
