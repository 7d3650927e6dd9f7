use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Required input dataset not found at '{0}'. Did the upstream stage run?")]
    InputNotFound(PathBuf),

    #[error("Failed to read or write a dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode or decode a CSV row: {0}")]
    Csv(#[from] csv::Error),
}
