use async_trait::async_trait;
use chrono::NaiveDate;
use core_types::{PriceBar, PriceRecord, PriceSeries};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::str::FromStr;

pub mod error;

// Re-export the error type to create a clean, public-facing API.
pub use error::ApiError;

/// The generic, abstract interface for a daily-quote provider.
/// This trait is the contract the fetch stage uses, allowing the underlying
/// implementation (live or mock) to be swapped out.
#[async_trait]
pub trait MarketDataClient: Send + Sync {
    /// Fetches the daily close history for one symbol over an inclusive
    /// date range, ordered by date.
    async fn fetch_daily_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, ApiError>;
}

/// A concrete implementation of `MarketDataClient` for the Stooq quote
/// service, which serves adjusted daily history as plain CSV and requires
/// no authentication.
#[derive(Clone)]
pub struct StooqClient {
    client: reqwest::Client,
    base_url: String,
}

impl StooqClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: "https://stooq.com".to_string(),
        }
    }
}

impl Default for StooqClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataClient for StooqClient {
    async fn fetch_daily_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, ApiError> {
        let url = format!(
            "{}/q/d/l/?s={}&d1={}&d2={}&i=d",
            self.base_url,
            symbol,
            start.format("%Y%m%d"),
            end.format("%Y%m%d"),
        );

        tracing::debug!(symbol, %url, "requesting daily history");
        let body = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let series = parse_daily_csv(symbol, &body)?;
        series.validate()?;
        tracing::info!(symbol, bars = series.bars.len(), "daily history fetched");
        Ok(series)
    }
}

/// One row of the Stooq daily CSV (`Date,Open,High,Low,Close,Volume`).
///
/// The fields stay as strings here: Stooq marks holidays and unknown values
/// with `N/D`, and those rows are dropped rather than treated as errors.
#[derive(Debug, Deserialize)]
struct QuoteRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Close")]
    close: String,
}

fn parse_daily_csv(symbol: &str, body: &str) -> Result<PriceSeries, ApiError> {
    if !body.starts_with("Date,") {
        // Unknown symbols come back as a short plain-text message.
        return Err(ApiError::NoData(symbol.to_string()));
    }

    let mut reader = csv::Reader::from_reader(body.as_bytes());
    let mut bars = Vec::new();
    for row in reader.deserialize::<QuoteRow>() {
        let row = row.map_err(|e| ApiError::Parse(symbol.to_string(), e.to_string()))?;
        let (Ok(date), Ok(close)) = (
            NaiveDate::from_str(&row.date),
            Decimal::from_str(&row.close),
        ) else {
            tracing::debug!(symbol, date = %row.date, "skipping row without a usable close");
            continue;
        };
        bars.push(PriceBar { date, close });
    }

    if bars.is_empty() {
        return Err(ApiError::NoData(symbol.to_string()));
    }
    Ok(PriceSeries::new(symbol, bars))
}

/// Inner-joins the asset and benchmark histories on their trading dates,
/// preserving ascending date order.
///
/// Dates present in only one series (holiday-calendar mismatches between
/// exchanges) are dropped, so the resulting snapshot has no gaps in either
/// column.
pub fn align(asset: &PriceSeries, benchmark: &PriceSeries) -> Vec<PriceRecord> {
    let benchmark_by_date: BTreeMap<NaiveDate, Decimal> = benchmark
        .bars
        .iter()
        .map(|bar| (bar.date, bar.close))
        .collect();

    asset
        .bars
        .iter()
        .filter_map(|bar| {
            benchmark_by_date.get(&bar.date).map(|&close| PriceRecord {
                date: bar.date,
                asset_close: bar.close,
                benchmark_close: close,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SAMPLE: &str = "\
Date,Open,High,Low,Close,Volume
2024-01-02,61.0,62.0,60.5,61.5,1000
2024-01-03,61.5,62.5,61.0,62.1,1200
2024-01-04,62.1,62.2,61.0,N/D,0
2024-01-05,62.0,63.0,61.8,62.8,900
";

    #[test]
    fn parses_rows_and_drops_unusable_closes() {
        let series = parse_daily_csv("mbg.de", SAMPLE).unwrap();
        assert_eq!(series.symbol, "mbg.de");
        assert_eq!(series.bars.len(), 3);
        assert_eq!(series.bars[1].close, dec!(62.1));
        assert!(series.validate().is_ok());
    }

    #[test]
    fn no_data_body_is_a_typed_error() {
        assert!(matches!(
            parse_daily_csv("bogus", "No data"),
            Err(ApiError::NoData(_))
        ));
        assert!(matches!(
            parse_daily_csv("bogus", "Date,Open,High,Low,Close,Volume\n"),
            Err(ApiError::NoData(_))
        ));
    }

    #[test]
    fn align_keeps_only_shared_dates_in_order() {
        let asset = PriceSeries::new(
            "mbg.de",
            vec![
                PriceBar {
                    date: "2024-01-02".parse().unwrap(),
                    close: dec!(61.5),
                },
                PriceBar {
                    date: "2024-01-03".parse().unwrap(),
                    close: dec!(62.1),
                },
                PriceBar {
                    date: "2024-01-04".parse().unwrap(),
                    close: dec!(62.8),
                },
            ],
        );
        let benchmark = PriceSeries::new(
            "^spx",
            vec![
                PriceBar {
                    date: "2024-01-02".parse().unwrap(),
                    close: dec!(4742.83),
                },
                PriceBar {
                    date: "2024-01-04".parse().unwrap(),
                    close: dec!(4704.81),
                },
            ],
        );

        let aligned = align(&asset, &benchmark);
        assert_eq!(aligned.len(), 2);
        assert_eq!(aligned[0].date, "2024-01-02".parse().unwrap());
        assert_eq!(aligned[0].asset_close, dec!(61.5));
        assert_eq!(aligned[0].benchmark_close, dec!(4742.83));
        assert_eq!(aligned[1].date, "2024-01-04".parse().unwrap());
    }
}
