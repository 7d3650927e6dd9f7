use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{AnalyticsSettings, Config, DataSettings, FetchSettings, StrategySettings};

/// Loads the application configuration from the `config.toml` file.
///
/// This function is the primary entry point for this crate. It reads the
/// configuration file, deserializes it into our strongly-typed `Config`
/// struct, validates it, and returns it.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        // Tells the builder to look for a file named `config.toml`
        .add_source(config::File::with_name("config.toml"))
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    Ok(config)
}

/// Rejects parameter combinations no run could make sense of.
fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.strategy.sma_window < 2 {
        return Err(ConfigError::ValidationError(
            "strategy.sma_window must be at least 2".to_string(),
        ));
    }
    if config.fetch.start_date >= config.fetch.end_date {
        return Err(ConfigError::ValidationError(
            "fetch.start_date must precede fetch.end_date".to_string(),
        ));
    }
    if config.analytics.trading_days_per_year == 0 {
        return Err(ConfigError::ValidationError(
            "analytics.trading_days_per_year must be positive".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn parse(toml: &str) -> Result<Config, ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize::<Config>()?;
        validate(&config)?;
        Ok(config)
    }

    const MINIMAL: &str = r#"
        [fetch]
        asset_symbol = "mbg.de"
        benchmark_symbol = "^spx"
        start_date = "2015-01-01"
        end_date = "2025-01-01"

        [data]
        dir = "data"

        [strategy]

        [analytics]
    "#;

    #[test]
    fn minimal_config_gets_documented_defaults() {
        let config = parse(MINIMAL).unwrap();
        assert_eq!(config.strategy.sma_window, 30);
        assert_eq!(config.analytics.trading_days_per_year, 252);
        assert_eq!(config.analytics.risk_free_rate, dec!(0.02));
        assert_eq!(config.data.returns_file, "strategy_returns.csv");
    }

    #[test]
    fn degenerate_window_is_rejected() {
        let toml = MINIMAL.replace("[strategy]", "[strategy]\nsma_window = 1");
        assert!(matches!(
            parse(&toml),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn inverted_date_range_is_rejected() {
        let toml = MINIMAL.replace("\"2025-01-01\"", "\"2014-01-01\"");
        assert!(matches!(
            parse(&toml),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
