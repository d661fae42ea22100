//! This module contains clustering algorithms which work on a precomputed dissimilarity matrix.

use crate::models::Grid;
use crate::utils::GenericResult;

mod complete_linkage;
pub use self::complete_linkage::CompleteLinkage;

/// Splits items into clusters using their pairwise dissimilarity.
pub trait Clusterer {
    /// Assigns a cluster label in `0..k` to every item of the square `dissimilarity` matrix.
    /// Every label in `0..k` is used when `k` does not exceed the amount of items.
    fn cluster(&self, dissimilarity: &Grid<f64>, k: usize) -> GenericResult<Vec<usize>>;
}
