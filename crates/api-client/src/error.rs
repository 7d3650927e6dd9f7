use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request to the market data provider failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("The provider returned no usable rows for symbol '{0}'")]
    NoData(String),

    #[error("Failed to parse the provider response for '{0}': {1}")]
    Parse(String, String),

    #[error("Fetched series failed validation: {0}")]
    Invalid(#[from] core_types::CoreError),
}
