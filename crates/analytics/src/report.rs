use core_types::{EquityPoint, Variant, VariantMetrics};
use serde::{Deserialize, Serialize};

/// The combined output of one analytics pass.
///
/// This struct is the final output of the `AnalyticsEngine` and carries both
/// persisted tables: the per-date equity curves and the per-variant metrics,
/// the latter in the display order the caller asked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub equity_curve: Vec<EquityPoint>,
    pub metrics: Vec<VariantMetrics>,
}

impl AnalyticsReport {
    /// Looks up the metrics row for one variant, if it was requested.
    pub fn metrics_for(&self, variant: Variant) -> Option<&VariantMetrics> {
        self.metrics.iter().find(|m| m.variant == variant)
    }
}
