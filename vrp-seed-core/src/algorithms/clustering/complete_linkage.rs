#[cfg(test)]
#[path = "../../../tests/unit/algorithms/clustering/complete_linkage_test.rs"]
mod complete_linkage_test;

use super::Clusterer;
use crate::models::Grid;
use crate::utils::{GenericResult, Random, compare_floats};
use std::cmp::Ordering;
use std::sync::Arc;

/// A hierarchical agglomerative clustering with complete linkage: the distance between two
/// clusters is the largest dissimilarity between their members. Clusters are merged pairwise,
/// closest first, until `k` of them remain.
///
/// Ties between equally close pairs are broken by the random source, so results are repeatable
/// for a seeded one. Labels are numbered by the smallest item index of each cluster.
pub struct CompleteLinkage {
    random: Arc<dyn Random>,
}

impl CompleteLinkage {
    /// Creates a new instance of `CompleteLinkage`.
    pub fn new(random: Arc<dyn Random>) -> Self {
        Self { random }
    }
}

impl Clusterer for CompleteLinkage {
    fn cluster(&self, dissimilarity: &Grid<f64>, k: usize) -> GenericResult<Vec<usize>> {
        let size = dissimilarity.rows();

        if !dissimilarity.is_square() {
            return Err(format!("dissimilarity matrix must be square, got {size}x{}", dissimilarity.cols()).into());
        }

        if size == 0 {
            return Ok(Vec::default());
        }

        if k == 0 || k > size {
            return Err(format!("cannot split {size} items into {k} clusters").into());
        }

        let mut state = LinkageState::new(dissimilarity);

        while state.active_count > k {
            let (left, right) = state.select_closest_pair(self.random.as_ref());
            state.merge(left, right);
        }

        Ok(state.labels())
    }
}

struct LinkageState {
    distances: Grid<f64>,
    active: Vec<bool>,
    active_count: usize,
    members: Vec<Vec<usize>>,
    nearest: Vec<(usize, f64)>,
}

impl LinkageState {
    fn new(dissimilarity: &Grid<f64>) -> Self {
        let size = dissimilarity.rows();
        let mut distances = Grid::new(size, size, 0.);

        // asymmetric input is treated by the worst direction
        for row in 0..size {
            for col in 0..size {
                let value = match (dissimilarity.get(row, col), dissimilarity.get(col, row)) {
                    (Some(&forward), Some(&backward)) => forward.max(backward),
                    _ => f64::INFINITY,
                };
                distances.set(row, col, value);
            }
        }

        let mut state = Self {
            distances,
            active: vec![true; size],
            active_count: size,
            members: (0..size).map(|item| vec![item]).collect(),
            nearest: vec![(0, f64::INFINITY); size],
        };

        (0..size).for_each(|cluster| state.update_nearest(cluster));

        state
    }

    fn distance(&self, left: usize, right: usize) -> f64 {
        self.distances.get(left, right).copied().unwrap_or(f64::INFINITY)
    }

    fn update_nearest(&mut self, cluster: usize) {
        self.nearest[cluster] = (0..self.active.len())
            .filter(|&other| other != cluster && self.active[other])
            .map(|other| (other, self.distance(cluster, other)))
            .min_by(|(a_idx, a), (b_idx, b)| compare_floats(*a, *b).then(a_idx.cmp(b_idx)))
            .unwrap_or((cluster, f64::INFINITY));
    }

    fn select_closest_pair(&self, random: &dyn Random) -> (usize, usize) {
        let candidates = (0..self.active.len()).filter(|&cluster| self.active[cluster]);

        let best = candidates
            .clone()
            .map(|cluster| self.nearest[cluster].1)
            .min_by(|a, b| compare_floats(*a, *b))
            .unwrap_or(f64::INFINITY);

        let ties = candidates
            .filter(|&cluster| compare_floats(self.nearest[cluster].1, best) == Ordering::Equal)
            .collect::<Vec<_>>();

        let cluster = ties[random.pick_index(ties.len())];
        let other = self.nearest[cluster].0;

        (cluster.min(other), cluster.max(other))
    }

    fn merge(&mut self, left: usize, right: usize) {
        self.active[right] = false;
        self.active_count -= 1;

        let moved = std::mem::take(&mut self.members[right]);
        self.members[left].extend(moved);

        for other in (0..self.active.len()).filter(|&other| other != left && self.active[other]) {
            let value = self.distance(left, other).max(self.distance(right, other));
            self.distances.set(left, other, value);
            self.distances.set(other, left, value);
        }

        // merged distances never decrease, only clusters pointing to merged ones need an update
        let stale = (0..self.active.len())
            .filter(|&cluster| self.active[cluster])
            .filter(|&cluster| cluster == left || self.nearest[cluster].0 == left || self.nearest[cluster].0 == right)
            .collect::<Vec<_>>();

        stale.into_iter().for_each(|cluster| self.update_nearest(cluster));
    }

    fn labels(&self) -> Vec<usize> {
        let mut clusters = (0..self.active.len())
            .filter(|&cluster| self.active[cluster])
            .filter_map(|cluster| self.members[cluster].iter().min().map(|&first| (first, cluster)))
            .collect::<Vec<_>>();
        clusters.sort_unstable();

        let size = self.members.iter().map(|members| members.len()).sum();
        let mut labels = vec![0; size];

        clusters.iter().enumerate().for_each(|(label, &(_, cluster))| {
            self.members[cluster].iter().for_each(|&item| labels[item] = label);
        });

        labels
    }
}
