use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The market exposure dictated by a signal: fully invested or out of the market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stance {
    Long,
    Flat,
}

impl Stance {
    /// Returns the position multiplier applied to the asset's return.
    pub fn exposure(&self) -> Decimal {
        match self {
            Stance::Long => Decimal::ONE,
            Stance::Flat => Decimal::ZERO,
        }
    }
}

/// Identifies which of the compared return streams a metric row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variant {
    Strategy,
    #[serde(rename = "Buy & Hold")]
    BuyAndHold,
    Benchmark,
}

impl Variant {
    /// The human-readable name used in reports and persisted tables.
    pub fn label(&self) -> &'static str {
        match self {
            Variant::Strategy => "Strategy",
            Variant::BuyAndHold => "Buy & Hold",
            Variant::Benchmark => "Benchmark",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
