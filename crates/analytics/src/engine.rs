use crate::error::AnalyticsError;
use crate::report::AnalyticsReport;
use core_types::{EquityPoint, ReturnRecord, Variant, VariantMetrics};
use rust_decimal::{Decimal, MathematicalOps};

/// The assumptions the metric formulas run under. These are passed in by the
/// caller rather than read from process-wide constants, so one process can
/// analyze the same series under different conventions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyticsConfig {
    /// The annualization factor: trading periods per year.
    pub trading_days_per_year: u32,
    /// The assumed annual risk-free rate for the Sharpe ratio (0.02 = 2%).
    pub risk_free_rate: Decimal,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            trading_days_per_year: 252,
            risk_free_rate: Decimal::new(2, 2),
        }
    }
}

/// A stateless calculator deriving equity curves and performance metrics
/// from a return series.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {
    config: AnalyticsConfig,
}

impl AnalyticsEngine {
    pub fn new(config: AnalyticsConfig) -> Self {
        Self { config }
    }

    /// The main entry point for the analytics pass.
    ///
    /// # Arguments
    ///
    /// * `records` - The fully defined return series from the backtester.
    /// * `order` - The variants to report on, in display order. The metrics
    ///   table preserves this order exactly.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `AnalyticsReport` or an `AnalyticsError`.
    /// The whole pass fails rather than emitting a partial report when any
    /// requested metric is undefined for the input.
    pub fn analyze(
        &self,
        records: &[ReturnRecord],
        order: &[Variant],
    ) -> Result<AnalyticsReport, AnalyticsError> {
        let strategy_returns: Vec<Decimal> = records.iter().map(|r| r.strategy_return).collect();
        let asset_returns: Vec<Decimal> = records.iter().map(|r| r.asset_return).collect();
        let benchmark_returns: Vec<Decimal> = records.iter().map(|r| r.benchmark_return).collect();

        let strategy_equity = equity_curve(&strategy_returns);
        let asset_equity = equity_curve(&asset_returns);
        let benchmark_equity = equity_curve(&benchmark_returns);

        let equity_rows: Vec<EquityPoint> = records
            .iter()
            .enumerate()
            .map(|(i, r)| EquityPoint {
                date: r.date,
                strategy_equity: strategy_equity[i],
                asset_equity: asset_equity[i],
                benchmark_equity: benchmark_equity[i],
            })
            .collect();

        let mut metrics = Vec::with_capacity(order.len());
        for &variant in order {
            let (returns, equity) = match variant {
                Variant::Strategy => (&strategy_returns, &strategy_equity),
                Variant::BuyAndHold => (&asset_returns, &asset_equity),
                Variant::Benchmark => (&benchmark_returns, &benchmark_equity),
            };
            metrics.push(VariantMetrics {
                variant,
                cagr: self.cagr(equity.last().copied().unwrap_or(Decimal::ONE), equity.len())?,
                sharpe_ratio: self.sharpe_ratio(returns)?,
                max_drawdown: max_drawdown(equity),
            });
        }

        tracing::info!(periods = records.len(), variants = metrics.len(), "analytics pass complete");
        Ok(AnalyticsReport {
            equity_curve: equity_rows,
            metrics,
        })
    }

    /// The compound annual growth rate implied by the final equity value.
    ///
    /// Undefined for series shorter than two periods: there is no elapsed
    /// window to annualize over.
    fn cagr(&self, final_equity: Decimal, periods: usize) -> Result<Decimal, AnalyticsError> {
        if periods < 2 {
            return Err(AnalyticsError::DegenerateResult(format!(
                "CAGR needs at least two periods to annualize, got {periods}"
            )));
        }

        let years =
            Decimal::from(periods as u64) / Decimal::from(self.config.trading_days_per_year);
        Ok(final_equity.powd(Decimal::ONE / years) - Decimal::ONE)
    }

    /// The annualized Sharpe ratio over the configured risk-free rate.
    ///
    /// Uses the sample standard deviation (N-1 denominator) to match
    /// conventional finance tooling. A zero-variance excess series (e.g., an
    /// all-flat strategy) yields 0.0 rather than a division-by-zero fault,
    /// keeping downstream tables well-formed.
    fn sharpe_ratio(&self, returns: &[Decimal]) -> Result<Decimal, AnalyticsError> {
        if returns.len() < 2 {
            return Ok(Decimal::ZERO);
        }

        let trading_days = Decimal::from(self.config.trading_days_per_year);
        // Convert the annual risk-free assumption to a per-period rate.
        let rf_period =
            (Decimal::ONE + self.config.risk_free_rate).powd(Decimal::ONE / trading_days)
                - Decimal::ONE;

        let excess: Vec<Decimal> = returns.iter().map(|r| r - rf_period).collect();
        let n = Decimal::from(excess.len() as u64);
        let mean = excess.iter().sum::<Decimal>() / n;
        let variance = excess
            .iter()
            .map(|e| (e - mean) * (e - mean))
            .sum::<Decimal>()
            / (n - Decimal::ONE);

        if variance.is_zero() {
            return Ok(Decimal::ZERO);
        }
        let std_dev = variance.sqrt().ok_or_else(|| {
            AnalyticsError::Calculation("failed to take the square root of the variance".to_string())
        })?;
        let sqrt_trading_days = trading_days.sqrt().ok_or_else(|| {
            AnalyticsError::Calculation(
                "failed to take the square root of the annualization factor".to_string(),
            )
        })?;

        Ok((mean * trading_days) / (std_dev * sqrt_trading_days))
    }
}

/// The cumulative growth of one unit of capital: equity(t) = Π (1 + r(i)),
/// with an implicit baseline of 1.0 before the first record.
fn equity_curve(returns: &[Decimal]) -> Vec<Decimal> {
    let mut equity = Decimal::ONE;
    returns
        .iter()
        .map(|r| {
            equity *= Decimal::ONE + r;
            equity
        })
        .collect()
}

/// The largest peak-to-trough decline of an equity curve, as a fraction of
/// the peak. Always <= 0; exactly 0 for a curve that never falls below a
/// prior high.
fn max_drawdown(equity: &[Decimal]) -> Decimal {
    let mut max_drawdown = Decimal::ZERO;
    let Some(&first) = equity.first() else {
        return max_drawdown;
    };

    let mut peak = first;
    for &value in equity {
        if value > peak {
            peak = value;
        }
        let drawdown = (value - peak) / peak;
        if drawdown < max_drawdown {
            max_drawdown = drawdown;
        }
    }
    max_drawdown
}
