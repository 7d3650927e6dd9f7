use thiserror::Error;

#[derive(Error, Debug)]
pub enum BacktestError {
    #[error("Datastore error occurred during backtest: {0}")]
    Store(#[from] datastore::StoreError),

    #[error("Strategy execution error: {0}")]
    Strategy(#[from] strategies::StrategyError),

    #[error(
        "No fully defined rows survive the warm-up and execution lag; \
         the price history is too short for the configured window."
    )]
    EmptySeries,
}
