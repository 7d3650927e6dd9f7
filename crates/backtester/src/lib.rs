//! # Meridian Backtester
//!
//! The Signal & Return Engine: drives a signal rule over the aligned price
//! history, applies the one-period execution lag, and produces the trimmed
//! per-day return series the analytics stage consumes.

use crate::error::BacktestError;
use core_types::{PriceRecord, ReturnRecord, Stance};
use datastore::CsvStore;
use rust_decimal::Decimal;
use strategies::Strategy;

pub mod error;

/// The main backtesting engine.
///
/// This struct also handles the persistence of its own results: one `run`
/// loads the price snapshot, computes the return series, and writes it back
/// through the store.
pub struct BacktestRunner {
    strategy: Box<dyn Strategy>,
    store: CsvStore,
}

impl BacktestRunner {
    pub fn new(strategy: Box<dyn Strategy>, store: CsvStore) -> Self {
        Self { strategy, store }
    }

    /// Runs the engine end to end and returns the persisted series.
    pub fn run(&mut self) -> Result<Vec<ReturnRecord>, BacktestError> {
        let prices = self.store.load_price_history()?;
        tracing::info!(rows = prices.len(), "price snapshot loaded");

        let records = compute_return_series(self.strategy.as_mut(), &prices)?;
        self.store.save_returns(&records)?;

        Ok(records)
    }
}

/// The pure core of the engine.
///
/// For each date `t` with a prior close, the asset and benchmark returns are
/// `close(t)/close(t-1) - 1`; the strategy return applies the stance decided
/// at the close of `t-1` to the asset return of `t` ("decide at yesterday's
/// close, execute today"). Dates where any of the three values is undefined
/// (indicator warm-up, the lag itself, the missing first prior close) are
/// dropped, leaving a contiguous fully defined tail in date order.
pub fn compute_return_series(
    strategy: &mut dyn Strategy,
    prices: &[PriceRecord],
) -> Result<Vec<ReturnRecord>, BacktestError> {
    let mut records = Vec::with_capacity(prices.len());
    // The stance decided at the previous close, i.e. the one in force today.
    let mut executed_stance: Option<Stance> = None;
    let mut prev_bar: Option<&PriceRecord> = None;

    for bar in prices {
        let raw_stance = strategy.evaluate(bar.asset_close)?;

        if let (Some(stance), Some(prev)) = (executed_stance, prev_bar) {
            let asset_return = bar.asset_close / prev.asset_close - Decimal::ONE;
            let benchmark_return = bar.benchmark_close / prev.benchmark_close - Decimal::ONE;
            records.push(ReturnRecord {
                date: bar.date,
                asset_return,
                benchmark_return,
                strategy_return: stance.exposure() * asset_return,
            });
        }

        // Today's raw signal only takes effect at the next bar.
        executed_stance = raw_stance;
        prev_bar = Some(bar);
    }

    if records.is_empty() {
        return Err(BacktestError::EmptySeries);
    }
    tracing::info!(
        rows = records.len(),
        first = %records[0].date,
        "return series computed"
    );
    Ok(records)
}
