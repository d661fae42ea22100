//! This crate reads a routing problem in json format, normalizes it into the positional data
//! model of `vrp-seed-core`, builds a seed solution and writes the optimized solution back in
//! terms of external ids.
//!
//! # Examples
//!
//! ```
//! use std::io::BufReader;
//! use vrp_seed_core::solver::NoopOptimizer;
//! use vrp_seed_format::config::{Config, create_environment};
//! use vrp_seed_format::solve;
//!
//! let problem = r#"{
//!   "matrices": [{ "time": [0, 1, 1, 0], "distance": [0, 1, 1, 0] }],
//!   "vehicles": [{ "id": "v1", "startIndex": 0, "endIndex": 0 }],
//!   "services": [{ "id": "s1", "matrixIndex": 1, "timeWindows": [] }]
//! }"#;
//!
//! let config = Config::default();
//! let environment = create_environment(&config);
//! let optimizer = NoopOptimizer::new(environment.logger.clone());
//!
//! let solution = solve(BufReader::new(problem.as_bytes()), &config, &environment, &optimizer).unwrap();
//!
//! assert_eq!(solution.routes[0].service_ids, vec!["s1".to_string()]);
//! ```

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

#[cfg(test)]
#[path = "../tests/discovery/mod.rs"]
pub mod discovery;

mod utils;
mod validation;

pub mod config;
pub mod format;
pub mod pipeline;

pub use vrp_seed_core as core;

use crate::config::Config;
use crate::format::MultiFormatError;
use crate::format::problem::deserialize_raw_problem;
use crate::format::solution::{Solution, create_solution};
use crate::pipeline::create_seed_pipeline;
use std::io::{BufReader, Read};
use vrp_seed_core::solver::Optimizer;
use vrp_seed_core::utils::{Environment, GenericError, GenericResult};

impl From<MultiFormatError> for GenericError {
    fn from(err: MultiFormatError) -> Self {
        GenericError::from(err.to_string())
    }
}

/// Reads problem, runs normalization pipeline and optimizer and returns solution in external ids.
/// No optimizer is invoked if normalization fails.
pub fn solve<R: Read>(
    reader: BufReader<R>,
    config: &Config,
    environment: &Environment,
    optimizer: &dyn Optimizer,
) -> GenericResult<Solution> {
    let raw = deserialize_raw_problem(reader)?;
    let pipeline = create_seed_pipeline()?;

    let mut normalized = pipeline.run(raw, config.initial_settings(), environment)?;

    let time_limit = config.time_limit();
    (environment.logger)(&format!("optimizing with time budget {time_limit}s"));
    optimizer.optimize(&mut normalized.model, time_limit)?;

    normalized.model.verify()?;

    Ok(create_solution(&normalized.problem, &normalized.index, &normalized.model)?)
}
