use crate::Strategy;
use crate::error::StrategyError;
use core_types::Stance;
use rust_decimal::prelude::*;
use ta::Next;
use ta::indicators::SimpleMovingAverage as Sma;

/// The single-asset SMA momentum rule: be long while the close sits strictly
/// above its trailing simple moving average, flat otherwise.
///
/// A close exactly equal to its average resolves to `Flat`: ties favor no
/// exposure.
pub struct SmaMomentum {
    sma: Sma,
    window: usize,
    // Closes observed so far, to report the warm-up period as undefined.
    observed: usize,
}

impl SmaMomentum {
    /// Creates a new `SmaMomentum` instance over the given trailing window.
    pub fn new(window: usize) -> Result<Self, StrategyError> {
        // Validation: a one-period average is just the close itself and the
        // strict comparison could never go long.
        if window < 2 {
            return Err(StrategyError::InvalidParameters(
                "SMA window must be at least 2 periods".to_string(),
            ));
        }

        Ok(Self {
            sma: Sma::new(window).unwrap(),
            window,
            observed: 0,
        })
    }
}

impl Strategy for SmaMomentum {
    fn evaluate(&mut self, close: Decimal) -> Result<Option<Stance>, StrategyError> {
        // The `ta` crate uses `f64`. We must convert from our high-precision
        // `Decimal`. This is a controlled and accepted precision trade-off for
        // using the library.
        let close_f64 = close.to_f64().ok_or_else(|| {
            StrategyError::IndicatorError(format!("close {close} is not representable as f64"))
        })?;
        let current_sma = Decimal::from_f64(self.sma.next(close_f64)).ok_or_else(|| {
            StrategyError::IndicatorError("moving average produced a non-finite value".to_string())
        })?;

        // The indicator averages however many closes it has seen; the rule is
        // undefined until a full window has gone in.
        self.observed += 1;
        if self.observed < self.window {
            return Ok(None);
        }

        let stance = if close > current_sma {
            Stance::Long
        } else {
            Stance::Flat
        };
        tracing::trace!(%close, %current_sma, ?stance, "evaluated momentum rule");

        Ok(Some(stance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn warm_up_period_is_undefined() {
        let mut rule = SmaMomentum::new(3).unwrap();
        assert_eq!(rule.evaluate(dec!(10)).unwrap(), None);
        assert_eq!(rule.evaluate(dec!(10)).unwrap(), None);
        // Third close fills the window.
        assert!(rule.evaluate(dec!(10)).unwrap().is_some());
    }

    #[test]
    fn close_above_average_goes_long() {
        let mut rule = SmaMomentum::new(3).unwrap();
        rule.evaluate(dec!(10)).unwrap();
        rule.evaluate(dec!(10)).unwrap();
        rule.evaluate(dec!(10)).unwrap();
        // SMA of [10, 10, 13] = 11, and 13 > 11.
        assert_eq!(rule.evaluate(dec!(13)).unwrap(), Some(Stance::Long));
    }

    #[test]
    fn tie_with_average_stays_flat() {
        let mut rule = SmaMomentum::new(3).unwrap();
        rule.evaluate(dec!(10)).unwrap();
        rule.evaluate(dec!(10)).unwrap();
        // SMA of [10, 10, 10] = 10: close == SMA is not a long signal.
        assert_eq!(rule.evaluate(dec!(10)).unwrap(), Some(Stance::Flat));
    }

    #[test]
    fn close_below_average_stays_flat() {
        let mut rule = SmaMomentum::new(3).unwrap();
        rule.evaluate(dec!(12)).unwrap();
        rule.evaluate(dec!(11)).unwrap();
        assert_eq!(rule.evaluate(dec!(7)).unwrap(), Some(Stance::Flat));
    }

    #[test]
    fn degenerate_window_is_rejected() {
        assert!(SmaMomentum::new(1).is_err());
        assert!(SmaMomentum::new(0).is_err());
    }
}
