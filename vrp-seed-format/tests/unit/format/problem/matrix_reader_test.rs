use super::*;
use crate::helpers::*;
use vrp_seed_core::utils::Environment;

fn read(problem: &Problem) -> MatrixAttributes {
    read_matrices(problem, &Environment::silent_logger()).expect("cannot read matrices")
}

fn rows(grid: &Grid<f64>) -> Vec<Vec<f64>> {
    grid.iter_rows().map(|row| row.to_vec()).collect()
}

#[test]
fn can_augment_matrix_with_shared_depot() {
    let problem = create_problem(
        vec![create_vehicle("v0", 0, 0), create_vehicle("v1", 0, 0)],
        vec![create_service("s0", 2), create_service("s1", 1)],
        vec![create_matrix(vec![0., 2., 3., 7., 0., 8., 4., 6., 0.])],
    );

    let matrices = read(&problem);

    assert_eq!(matrices.dimension(), 3);
    assert_eq!(rows(&matrices.time[0]), vec![vec![0., 6., 4.], vec![8., 0., 7.], vec![3., 2., 0.]]);
    assert_eq!(matrices.time, matrices.distance);
    assert_eq!(matrices.depot_points, vec![0]);
    assert_eq!(matrices.start_node, vec![2, 2]);
    assert_eq!(matrices.end_node, vec![2, 2]);
}

#[test]
fn can_keep_service_submatrix_before_depot_nodes() {
    let problem = create_problem(
        vec![create_vehicle("v0", 0, 0), create_vehicle("v1", 0, 0)],
        vec![create_service("s0", 0), create_service("s1", 1)],
        vec![create_matrix(vec![0., 1., 1., 0.])],
    );

    let matrices = read(&problem);

    let time = &matrices.time[0];
    assert_eq!(&time.row(0)[..2], &[0., 1.]);
    assert_eq!(&time.row(1)[..2], &[1., 0.]);
    assert_eq!(matrices.dimension(), 3);
}

#[test]
fn can_order_end_points_before_start_points() {
    let problem = create_problem(
        vec![create_vehicle("v0", 0, 1), create_vehicle("v1", 2, 1)],
        vec![create_service("s0", 3)],
        vec![create_line_matrix(&[0., 10., 20., 30.])],
    );

    let matrices = read(&problem);

    assert_eq!(matrices.depot_points, vec![1, 0, 2]);
    assert_eq!(matrices.dimension(), 4);
    assert_eq!(matrices.start_node, vec![2, 3]);
    assert_eq!(matrices.end_node, vec![1, 1]);
    assert_eq!(matrices.time[0].row(0), &[0., 20., 30., 10.]);
    assert_eq!(matrices.time[0].row(3), &[10., 10., 20., 0.]);
}

#[test]
fn can_augment_every_matrix_group() {
    let mut second = create_matrix(vec![0., 5., 5., 0.]);
    second.distance = vec![0., 50., 50., 0.];
    let problem = create_problem(
        vec![create_vehicle("v0", 0, 0), Vehicle { matrix_index: Some(1), ..create_vehicle("v1", 0, 0) }],
        vec![create_service("s0", 1)],
        vec![create_matrix(vec![0., 1., 1., 0.]), second],
    );

    let matrices = read(&problem);

    assert_eq!(matrices.time.len(), 2);
    assert_eq!(matrices.distance.len(), 2);
    assert_eq!(rows(&matrices.time[1]), vec![vec![0., 5.], vec![5., 0.]]);
    assert_eq!(rows(&matrices.distance[1]), vec![vec![0., 50.], vec![50., 0.]]);
    assert!(matrices.time.iter().chain(matrices.distance.iter()).all(|grid| grid.is_square()));
}

parameterized_test! {can_get_matrix_size, (length, expected), {
    assert_eq!(get_matrix_size(&vec![0.; length]), expected);
}}

can_get_matrix_size! {
    case01_empty: (0, Some(0)),
    case02_one: (1, Some(1)),
    case03_square: (9, Some(3)),
    case04_not_square: (8, None),
    case05_not_square: (10, None),
}

parameterized_test! {can_verify_matrices, (matrices, service_index, vehicle_matrix, expected), {
    can_verify_matrices_impl(matrices, service_index, vehicle_matrix, expected);
}}

can_verify_matrices! {
    case01_no_matrices: (vec![], 0, None, Some("E1500")),
    case02_not_square: (vec![create_matrix(vec![0., 1., 1.])], 0, None, Some("E1501")),
    case03_size_mismatch: (vec![Matrix { time: vec![0.; 4], distance: vec![0.; 9] }], 0, None, Some("E1501")),
    case04_service_out_of_range: (vec![create_matrix(vec![0.; 4])], 2, None, Some("E1502")),
    case05_negative_index: (vec![create_matrix(vec![0.; 4])], -1, None, Some("E1502")),
    case06_unknown_group: (vec![create_matrix(vec![0.; 4])], 1, Some(1), Some("E1503")),
    case07_valid: (vec![create_matrix(vec![0.; 4]), create_matrix(vec![0.; 4])], 1, Some(1), None),
}

fn can_verify_matrices_impl(
    matrices: Vec<Matrix>,
    service_index: i64,
    vehicle_matrix: Option<i64>,
    expected: Option<&str>,
) {
    let vehicle = Vehicle { matrix_index: vehicle_matrix, ..create_vehicle("v0", 0, 0) };
    let problem = create_problem(vec![vehicle], vec![create_service("s0", service_index)], matrices);

    let result = verify_matrices(&problem);

    match expected {
        Some(code) => assert_eq!(result.expect_err("should fail").codes(), vec![code]),
        None => assert!(result.is_ok()),
    }
}

#[test]
fn can_report_out_of_range_points_when_reading() {
    let problem = create_problem(
        vec![create_vehicle("v0", 0, 3)],
        vec![create_service("s0", 1)],
        vec![create_matrix(vec![0.; 4])],
    );

    let err = read_matrices(&problem, &Environment::silent_logger()).expect_err("should fail");

    assert!(err.has_code("E1502"));
}
