use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Metric undefined for this input: {0}")]
    DegenerateResult(String),

    #[error("Error in calculation: {0}")]
    Calculation(String),
}
