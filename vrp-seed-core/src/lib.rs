//! Core crate contains the numeric data model consumed by a route optimizer together with the
//! algorithms used to construct a seed solution for it.
//!
//! The model is fully positional: every service, vehicle and matrix node is addressed by index,
//! symbolic identifiers are kept by the format layer.

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

pub mod algorithms;
pub mod models;
pub mod solver;
pub mod utils;

/// Reexports commonly used types.
pub mod prelude {
    pub use crate::algorithms::clustering::{Clusterer, CompleteLinkage};
    pub use crate::models::{DataModel, Grid, MatrixAttributes, ServiceAttributes, StartMode, VehicleAttributes};
    pub use crate::solver::{NoopOptimizer, Optimizer};
    pub use crate::utils::{DefaultRandom, Environment, GenericError, GenericResult, InfoLogger, Random};
}
