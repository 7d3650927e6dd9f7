use crate::enums::Variant;
use crate::error::CoreError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single daily observation for one symbol: the trading date and its closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub close: Decimal,
}

/// The full daily close history for one symbol, ordered by date.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub symbol: String,
    pub bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, bars: Vec<PriceBar>) -> Self {
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    /// Checks the invariants an input snapshot must satisfy before it enters
    /// the pipeline: dates strictly increasing (no duplicates) and closes
    /// strictly positive.
    pub fn validate(&self) -> Result<(), CoreError> {
        for window in self.bars.windows(2) {
            if window[1].date <= window[0].date {
                return Err(CoreError::InvalidInput(
                    self.symbol.clone(),
                    format!("dates not strictly increasing at {}", window[1].date),
                ));
            }
        }
        if let Some(bar) = self.bars.iter().find(|b| b.close <= Decimal::ZERO) {
            return Err(CoreError::InvalidInput(
                self.symbol.clone(),
                format!("non-positive close {} on {}", bar.close, bar.date),
            ));
        }
        Ok(())
    }
}

/// One row of the aligned price snapshot consumed by the backtester:
/// the traded asset and the benchmark on the same trading date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub date: NaiveDate,
    pub asset_close: Decimal,
    pub benchmark_close: Decimal,
}

/// One fully defined row of the persisted return series. All three values
/// are simple fractional returns; rows with any undefined operand (warm-up,
/// missing prior close) never make it into this type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnRecord {
    pub date: NaiveDate,
    pub asset_return: Decimal,
    pub benchmark_return: Decimal,
    pub strategy_return: Decimal,
}

/// One row of the persisted equity curves: the growth of one unit of capital
/// under each of the three return streams, from an implicit baseline of 1.0
/// before the first record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub strategy_equity: Decimal,
    pub asset_equity: Decimal,
    pub benchmark_equity: Decimal,
}

/// The performance summary for one compared variant.
///
/// `cagr` and `max_drawdown` are fractional (-0.15 = -15%); `sharpe_ratio`
/// is a unitless annualized ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VariantMetrics {
    pub variant: Variant,
    pub cagr: Decimal,
    pub sharpe_ratio: Decimal,
    pub max_drawdown: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bar(date: &str, close: Decimal) -> PriceBar {
        PriceBar {
            date: date.parse().unwrap(),
            close,
        }
    }

    #[test]
    fn validate_accepts_ordered_positive_series() {
        let series = PriceSeries::new(
            "mbg.de",
            vec![bar("2024-01-02", dec!(61.5)), bar("2024-01-03", dec!(62.1))],
        );
        assert!(series.validate().is_ok());
    }

    #[test]
    fn validate_rejects_duplicate_dates() {
        let series = PriceSeries::new(
            "mbg.de",
            vec![bar("2024-01-02", dec!(61.5)), bar("2024-01-02", dec!(62.1))],
        );
        assert!(series.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_positive_close() {
        let series = PriceSeries::new("mbg.de", vec![bar("2024-01-02", dec!(0))]);
        assert!(series.validate().is_err());
    }
}
