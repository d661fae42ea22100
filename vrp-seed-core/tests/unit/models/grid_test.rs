use super::*;

#[test]
fn can_create_grid_from_ragged_rows() {
    let grid = Grid::from_rows(vec![vec![1, 2, 3], vec![4], vec![]], -1);

    assert_eq!(grid.rows(), 3);
    assert_eq!(grid.cols(), 3);
    assert_eq!(grid.row(0), &[1, 2, 3]);
    assert_eq!(grid.row(1), &[4, -1, -1]);
    assert_eq!(grid.row(2), &[-1, -1, -1]);
}

parameterized_test! {can_fit_rows_to_width, (width, expected), {
    can_fit_rows_to_width_impl(width, expected);
}}

can_fit_rows_to_width! {
    case01_truncate: (1, vec![1, 3]),
    case02_exact: (2, vec![1, 2, 3, 0]),
    case03_pad: (3, vec![1, 2, 0, 3, 0, 0]),
    case04_empty: (0, vec![]),
}

fn can_fit_rows_to_width_impl(width: usize, expected: Vec<i32>) {
    let grid = Grid::from_rows_with_width(vec![vec![1, 2], vec![3]], width, 0);

    assert_eq!(grid.rows(), 2);
    assert_eq!(grid.cols(), width);
    assert_eq!(grid.values().copied().collect::<Vec<_>>(), expected);
}

#[test]
fn can_get_and_set_values_within_bounds_only() {
    let mut grid = Grid::new(2, 3, 0.);

    assert!(grid.set(1, 2, 5.));
    assert!(!grid.set(2, 0, 1.));
    assert!(!grid.set(0, 3, 1.));

    assert_eq!(grid.get(1, 2), Some(&5.));
    assert_eq!(grid.get(0, 3), None);
    assert_eq!(grid.get(2, 0), None);
    assert!(!grid.is_square());
}

#[test]
fn can_iterate_rows() {
    let mut grid = Grid::new(2, 2, 0);
    grid.row_mut(1).copy_from_slice(&[7, 8]);

    let rows = grid.iter_rows().map(|row| row.to_vec()).collect::<Vec<_>>();

    assert_eq!(rows, vec![vec![0, 0], vec![7, 8]]);
}
