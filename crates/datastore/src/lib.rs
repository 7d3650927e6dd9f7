//! # Meridian Datastore Crate
//!
//! This crate acts as a high-level, application-specific interface to the
//! persisted CSV datasets. It is the boundary between the pipeline stages,
//! and between the pipeline and the external dashboard that reads its output.
//!
//! ## Architectural Principles
//!
//! - **Layer 3 Adapter:** This crate is an adapter that encapsulates all
//!   file-format and file-layout logic. It provides a clean, typed API to the
//!   rest of the application, hiding the underlying CSV details.
//! - **Whole-Table Writes:** Every dataset is derived and recomputed in full
//!   on each run, so the store only supports replacing a table, never
//!   mutating it incrementally.
//!
//! ## Public API
//!
//! - `CsvStore`: The main struct that resolves the data directory layout and
//!   provides all the high-level access methods (e.g., `save_returns`).
//! - `StoreError`: The specific error types that can be returned from this
//!   crate, including `InputNotFound` for a missing upstream dataset.

// Declare the modules that constitute this crate.
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use error::StoreError;
pub use repository::CsvStore;
