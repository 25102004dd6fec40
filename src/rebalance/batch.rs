//! Parallel planning over independent portfolio snapshots.

use super::{Portfolio, RebalancePlan, Rebalancer};

/// Plan every portfolio in parallel. Results are in input order.
///
/// Each snapshot is evaluated independently; the rebalancer is shared
/// read-only across worker threads.
///
/// # Example
///
/// ```
/// use gridfolio::rebalance::{plan_batch, Portfolio, Rebalancer};
/// use gridfolio::Decimal;
///
/// let snapshots: Vec<Portfolio> = (0..4)
///     .map(|i| {
///         Portfolio::new(Decimal::from(1000))
///             .with_position("A", Decimal::from(500 + i * 50))
///             .with_target("A", Decimal::from(50))
///     })
///     .collect();
/// let plans = plan_batch(&Rebalancer::default(), &snapshots);
///
/// // 50.0% and 55.0% sit inside the default 5% band
/// let flags: Vec<bool> = plans.iter().map(|p| p.needs_rebalancing).collect();
/// assert_eq!(flags, [false, false, true, true]);
/// ```
#[cfg(feature = "parallel")]
pub fn plan_batch(rebalancer: &Rebalancer, portfolios: &[Portfolio]) -> Vec<RebalancePlan> {
    use rayon::prelude::*;

    portfolios
        .par_iter()
        .map(|p| rebalancer.plan(p))
        .collect()
}

#[cfg(test)]
#[cfg(feature = "parallel")]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn batch_matches_sequential() {
        let portfolios: Vec<Portfolio> = (1..=20)
            .map(|i| {
                Portfolio::new(Decimal::from(1000))
                    .with_position("A", Decimal::from(500 + i * 10))
                    .with_position("B", Decimal::from(500 - i * 10))
                    .with_target("A", Decimal::from(50))
                    .with_target("B", Decimal::from(50))
            })
            .collect();

        let rebalancer = Rebalancer::default();
        let batch = plan_batch(&rebalancer, &portfolios);
        assert_eq!(batch.len(), portfolios.len());
        for (plan, p) in batch.iter().zip(&portfolios) {
            assert_eq!(*plan, rebalancer.plan(p));
        }
    }
}
