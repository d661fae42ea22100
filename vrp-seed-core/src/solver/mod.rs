//! This module defines the seam to a route optimizer which improves the seed solution.

#[cfg(test)]
#[path = "../../tests/unit/solver/optimizer_test.rs"]
mod optimizer_test;

use crate::models::DataModel;
use crate::utils::{GenericResult, InfoLogger};

/// Improves the seed solution kept in the data model within the given time budget.
///
/// Implementations may change only `paths` and `unassigned_services` of the model.
pub trait Optimizer {
    /// Runs optimization, `time_budget` is in seconds.
    fn optimize(&self, model: &mut DataModel, time_budget: f64) -> GenericResult<()>;
}

/// An optimizer which keeps the seed solution untouched.
pub struct NoopOptimizer {
    logger: InfoLogger,
}

impl NoopOptimizer {
    /// Creates a new instance of `NoopOptimizer`.
    pub fn new(logger: InfoLogger) -> Self {
        Self { logger }
    }
}

impl Optimizer for NoopOptimizer {
    fn optimize(&self, model: &mut DataModel, time_budget: f64) -> GenericResult<()> {
        if !time_budget.is_finite() || time_budget < 0. {
            return Err(format!("time budget must be a non-negative number, got {time_budget}").into());
        }

        (self.logger)(&format!(
            "keeping seed solution: {} routes, {} unassigned, budget {time_budget}s unused",
            (0..model.paths.rows()).filter(|&row| model.paths.row(row).iter().any(|&value| value >= 0)).count(),
            model.unassigned_services.len()
        ));

        Ok(())
    }
}
