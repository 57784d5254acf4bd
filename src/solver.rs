//! Route balancer: initial partition followed by measured rebalancing.

use serde::Deserialize;
use tracing::{debug, info};

use crate::balance::{is_balanced, spread, DEFAULT_THRESHOLD_MIN};
use crate::error::{Error, Result};
use crate::geo::{AddressIndex, RegionSplit};
use crate::partition::partition;
use crate::rebalance::Rebalancer;
use crate::route::{work_time_table, RouteCollection, WorkTimeTable};
use crate::traits::CostOracle;
use crate::work_time::{ServiceTimeModel, WorkTimeEstimator};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SolveOptions {
    /// Largest tolerated spread between longest and shortest route, minutes.
    pub balance_threshold: f64,
    /// Hard cap on rebalancing moves.
    pub max_iterations: usize,
    /// Give up after this many moves without a new best spread. Zero disables.
    pub stall_limit: usize,
    /// Steps during which a point may not return to a route it left.
    pub tabu_tenure: usize,
    pub service: ServiceTimeModel,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            balance_threshold: DEFAULT_THRESHOLD_MIN,
            max_iterations: 200,
            stall_limit: 50,
            tabu_tenure: 2,
            service: ServiceTimeModel::default(),
        }
    }
}

/// Final routes with their measurements.
#[derive(Debug, Clone)]
pub struct BalancedPlan {
    pub routes: RouteCollection,
    pub work_times: WorkTimeTable,
    /// Moves applied to reach this plan.
    pub iterations: usize,
}

impl BalancedPlan {
    pub fn spread(&self) -> f64 {
        spread(&self.work_times)
    }
}

/// Partition `split` and rebalance until the spread is under the threshold.
///
/// If either the iteration cap or the stall limit is hit first, the best plan
/// seen is returned inside [`Error::ConvergenceLimit`].
pub fn solve<O>(
    split: &RegionSplit,
    index: &AddressIndex,
    oracle: &O,
    depot: &str,
    options: &SolveOptions,
) -> Result<BalancedPlan>
where
    O: CostOracle + Sync,
{
    let routes = partition(split)?;
    rebalance(routes, index, oracle, depot, options)
}

/// Rebalance an existing collection. Every route is measured first.
pub fn rebalance<O>(
    mut routes: RouteCollection,
    index: &AddressIndex,
    oracle: &O,
    depot: &str,
    options: &SolveOptions,
) -> Result<BalancedPlan>
where
    O: CostOracle + Sync,
{
    let estimator = WorkTimeEstimator::new(oracle, index, depot, options.service);
    estimator.measure_all(&mut routes)?;

    let mut rebalancer = Rebalancer::new(options.tabu_tenure);
    let mut table = work_time_table(&routes);
    let mut best = snapshot(&routes, &table, 0);
    let mut since_best = 0;
    let mut iteration = 0;

    loop {
        let current = spread(&table);
        if is_balanced(&table, options.balance_threshold) {
            info!(iterations = iteration, spread = current, "routes balanced");
            return Ok(BalancedPlan {
                routes,
                work_times: table,
                iterations: iteration,
            });
        }

        if current < best.spread() {
            best = snapshot(&routes, &table, iteration);
            since_best = 0;
        } else if iteration > 0 {
            since_best += 1;
        }

        let stalled = options.stall_limit > 0 && since_best >= options.stall_limit;
        if iteration >= options.max_iterations || stalled {
            info!(
                iterations = iteration,
                best_spread = best.spread(),
                "rebalancing stopped before convergence"
            );
            return Err(Error::ConvergenceLimit {
                iterations: iteration,
                spread: best.spread(),
                plan: Box::new(best),
            });
        }

        let transfer = rebalancer.step(&table, &mut routes)?;
        estimator.measure_route(&mut routes, transfer.from)?;
        estimator.measure_route(&mut routes, transfer.to)?;
        table = work_time_table(&routes);
        iteration += 1;
        debug!(iteration, spread = spread(&table), "re-measured after transfer");
    }
}

fn snapshot(routes: &RouteCollection, table: &WorkTimeTable, iterations: usize) -> BalancedPlan {
    BalancedPlan {
        routes: routes.clone(),
        work_times: table.clone(),
        iterations,
    }
}
