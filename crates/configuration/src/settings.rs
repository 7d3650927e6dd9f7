use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub fetch: FetchSettings,
    pub data: DataSettings,
    pub strategy: StrategySettings,
    pub analytics: AnalyticsSettings,
}

/// Parameters for the data acquisition step.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchSettings {
    /// The symbol of the traded asset (e.g., "mbg.de").
    pub asset_symbol: String,
    /// The symbol of the benchmark index (e.g., "^spx").
    pub benchmark_symbol: String,
    /// The first date of the requested history (inclusive).
    pub start_date: NaiveDate,
    /// The last date of the requested history (inclusive).
    pub end_date: NaiveDate,
}

/// Locations of the persisted CSV datasets.
#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    /// The directory all datasets are read from and written to.
    pub dir: PathBuf,
    /// The aligned price snapshot produced by `fetch`.
    #[serde(default = "default_price_file")]
    pub price_file: String,
    /// The trimmed return series produced by `backtest`.
    #[serde(default = "default_returns_file")]
    pub returns_file: String,
    /// The equity curves produced by `analyze`.
    #[serde(default = "default_equity_file")]
    pub equity_file: String,
    /// The metrics table produced by `analyze`.
    #[serde(default = "default_metrics_file")]
    pub metrics_file: String,
}

/// Parameters for the SMA momentum signal.
#[derive(Debug, Clone, Deserialize)]
pub struct StrategySettings {
    /// The trailing window of the simple moving average, in trading days.
    #[serde(default = "default_sma_window")]
    pub sma_window: usize,
}

/// Assumptions for the performance analytics step. These are deliberately
/// configuration rather than process-wide constants so that one process can
/// analyze under different conventions.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsSettings {
    /// The annualization factor: trading periods per year.
    #[serde(default = "default_trading_days_per_year")]
    pub trading_days_per_year: u32,
    /// The assumed annual risk-free rate for the Sharpe ratio (0.02 = 2%).
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: Decimal,
}

fn default_price_file() -> String {
    "historical_prices.csv".to_string()
}

fn default_returns_file() -> String {
    "strategy_returns.csv".to_string()
}

fn default_equity_file() -> String {
    "equity_curve.csv".to_string()
}

fn default_metrics_file() -> String {
    "performance_metrics.csv".to_string()
}

fn default_sma_window() -> usize {
    30
}

fn default_trading_days_per_year() -> u32 {
    252
}

fn default_risk_free_rate() -> Decimal {
    dec!(0.02)
}
