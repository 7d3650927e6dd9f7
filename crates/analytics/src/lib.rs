//! # Meridian Analytics Engine
//!
//! This crate provides the tools for conducting quantitative analysis of
//! strategy performance. It acts as the "unbiased judge" of the system.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   external systems. It depends only on `core-types` (Layer 0) and does no
//!   I/O; persisting its output is the caller's concern.
//! - **Stateless Calculation:** The `AnalyticsEngine` is a stateless
//!   calculator. It takes a return series as input and produces an
//!   `AnalyticsReport` as output. This makes it highly reliable and easy to
//!   test.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: The main struct that contains the calculation logic.
//! - `AnalyticsConfig`: The annualization and risk-free assumptions, passed
//!   in explicitly rather than read from ambient constants.
//! - `AnalyticsReport`: The equity curves plus the per-variant metrics table.
//! - `AnalyticsError`: The specific error types that can be returned from
//!   this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{AnalyticsConfig, AnalyticsEngine};
pub use error::AnalyticsError;
pub use report::AnalyticsReport;
