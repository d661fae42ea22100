use super::*;
use crate::helpers::models::create_grid;
use crate::utils::DefaultRandom;

fn cluster(matrix: &Grid<f64>, k: usize, seed: u64) -> GenericResult<Vec<usize>> {
    CompleteLinkage::new(Arc::new(DefaultRandom::new_with_seed(seed))).cluster(matrix, k)
}

fn line_matrix(points: &[f64]) -> Grid<f64> {
    Grid::from_rows(points.iter().map(|a| points.iter().map(|b| (a - b).abs()).collect()).collect(), 0.)
}

#[test]
fn can_split_two_separated_groups() {
    let matrix = line_matrix(&[0., 1., 2., 100., 101.]);

    let labels = cluster(&matrix, 2, 0).expect("should cluster");

    assert_eq!(labels, vec![0, 0, 0, 1, 1]);
}

#[test]
fn can_use_complete_linkage_instead_of_single() {
    // single linkage would join 4. with the right pair through its nearest member
    let matrix = line_matrix(&[0., 4., 7., 9.5]);

    let labels = cluster(&matrix, 2, 0).expect("should cluster");

    assert_eq!(labels, vec![0, 0, 1, 1]);
}

parameterized_test! {can_handle_edge_cluster_counts, (points, k, expected), {
    can_handle_edge_cluster_counts_impl(points, k, expected);
}}

can_handle_edge_cluster_counts! {
    case01_single_cluster: (vec![0., 5., 9.], 1, Ok(vec![0, 0, 0])),
    case02_singletons: (vec![3., 1., 2.], 3, Ok(vec![0, 1, 2])),
    case03_empty: (vec![], 1, Ok(vec![])),
    case04_zero_k: (vec![1.], 0, Err(())),
    case05_too_many: (vec![1., 2.], 3, Err(())),
}

fn can_handle_edge_cluster_counts_impl(points: Vec<f64>, k: usize, expected: Result<Vec<usize>, ()>) {
    let result = cluster(&line_matrix(&points), k, 0).map_err(|_| ());

    assert_eq!(result, expected);
}

#[test]
fn can_reject_non_square_matrix() {
    let matrix = create_grid(&[&[0., 1.], &[1., 0.], &[2., 2.]]);

    assert!(cluster(&matrix, 1, 0).is_err());
}

#[test]
fn can_symmetrize_asymmetric_input() {
    let matrix = create_grid(&[&[0., 1., 50.], &[100., 0., 2.], &[50., 2., 0.]]);

    let labels = cluster(&matrix, 2, 0).expect("should cluster");

    assert_eq!(labels, vec![0, 1, 1]);
}

#[test]
fn can_reproduce_tie_breaks_with_same_seed() {
    let matrix = Grid::from_rows((0..8).map(|a| (0..8).map(|b| if a == b { 0. } else { 1. }).collect()).collect(), 0.);

    let first = cluster(&matrix, 3, 7).expect("should cluster");
    let second = cluster(&matrix, 3, 7).expect("should cluster");

    assert_eq!(first, second);
    assert_eq!(first[0], 0);
    assert_eq!(first.iter().copied().max(), Some(2));
}
