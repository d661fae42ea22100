#[cfg(test)]
#[path = "../../../tests/unit/format/problem/matrix_reader_test.rs"]
mod matrix_reader_test;

use super::*;
use crate::format::{ErrorKind, FormatError, MultiFormatError};
use crate::utils::combine_format_checks;
use vrp_seed_core::models::{Grid, MatrixAttributes};
use vrp_seed_core::utils::InfoLogger;

/// Checks that raw matrices are square and every referenced point exists.
pub fn verify_matrices(problem: &Problem) -> Result<(), MultiFormatError> {
    if problem.matrices.is_empty() {
        return Err(FormatError::new(
            "E1500",
            ErrorKind::MissingCollection,
            "problem has no matrices".to_string(),
            "add at least one matrix with 'time' and 'distance'".to_string(),
        )
        .into());
    }

    check_e1501_square_matrices(problem)?;

    combine_format_checks(&[check_e1502_point_indices(problem), check_e1503_vehicle_matrix_groups(problem)])
}

/// Builds augmented matrices: one row per problem service in input order, then one row per distinct
/// vehicle end point, then one row per distinct start point which is not an end point already.
pub fn read_matrices(problem: &Problem, logger: &InfoLogger) -> Result<MatrixAttributes, MultiFormatError> {
    let service_points = problem
        .services
        .iter()
        .map(|service| to_point(service.matrix_index))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| point_error("service matrixIndex is missing or negative".to_string()))?;

    let start_points = problem.vehicles.iter().map(|vehicle| to_point(vehicle.start_index.or(Some(0))));
    let end_points = problem.vehicles.iter().map(|vehicle| to_point(vehicle.end_index.or(Some(0))));
    let start_points = start_points.collect::<Option<Vec<_>>>();
    let end_points = end_points.collect::<Option<Vec<_>>>();
    let (start_points, end_points) = start_points
        .zip(end_points)
        .ok_or_else(|| point_error("vehicle startIndex or endIndex is negative".to_string()))?;

    let mut depot_points: Vec<usize> = Vec::new();
    end_points.iter().chain(start_points.iter()).for_each(|&point| {
        if !depot_points.contains(&point) {
            depot_points.push(point);
        }
    });

    let num_services = service_points.len();
    let node_of = |point: usize| num_services + depot_points.iter().position(|&depot| depot == point).unwrap_or(0);
    let start_node = start_points.iter().map(|&point| node_of(point)).collect();
    let end_node = end_points.iter().map(|&point| node_of(point)).collect();

    let nodes = service_points.iter().chain(depot_points.iter()).copied().collect::<Vec<_>>();

    let (time, distance): (Vec<_>, Vec<_>) = problem
        .matrices
        .iter()
        .map(|matrix| Ok((augment(&matrix.time, &nodes)?, augment(&matrix.distance, &nodes)?)))
        .collect::<Result<Vec<_>, MultiFormatError>>()?
        .into_iter()
        .unzip();

    let attributes = MatrixAttributes { time, distance, depot_points, start_node, end_node };

    (logger)(&format!(
        "matrices augmented: {} groups of {}x{}, {} depot nodes",
        problem.matrices.len(),
        attributes.dimension(),
        attributes.dimension(),
        attributes.num_depots()
    ));

    Ok(attributes)
}

/// Returns side size of square raw matrix.
pub fn get_matrix_size(values: &[f64]) -> Option<usize> {
    let size = (values.len() as f64).sqrt().round() as usize;

    if size * size == values.len() { Some(size) } else { None }
}

fn augment(values: &[f64], nodes: &[usize]) -> Result<Grid<f64>, MultiFormatError> {
    let size = get_matrix_size(values).ok_or_else(|| square_error(values.len()))?;
    let dimension = nodes.len();
    let mut grid = Grid::new(dimension, dimension, 0.);

    for (row, &from) in nodes.iter().enumerate() {
        for (col, &to) in nodes.iter().enumerate() {
            let value = values
                .get(from * size + to)
                .filter(|_| from < size && to < size)
                .ok_or_else(|| point_error(format!("point {from} or {to} is outside of matrix of size {size}")))?;
            grid.set(row, col, *value);
        }
    }

    Ok(grid)
}

fn to_point(index: Option<i64>) -> Option<usize> {
    index.and_then(|index| usize::try_from(index).ok())
}

fn point_error(cause: String) -> MultiFormatError {
    FormatError::new("E1502", ErrorKind::IndexOutOfRange, cause, "fix point indices".to_string()).into()
}

fn square_error(length: usize) -> FormatError {
    FormatError::new(
        "E1501",
        ErrorKind::ShapeMismatch,
        format!("matrix of length {length} is not a perfect square"),
        "provide 'time' and 'distance' with size x size values".to_string(),
    )
}

fn check_e1501_square_matrices(problem: &Problem) -> Result<(), FormatError> {
    problem.matrices.iter().try_for_each(|matrix| {
        let time = get_matrix_size(&matrix.time).ok_or_else(|| square_error(matrix.time.len()))?;
        let distance = get_matrix_size(&matrix.distance).ok_or_else(|| square_error(matrix.distance.len()))?;

        if time == distance {
            Ok(())
        } else {
            Err(FormatError::new(
                "E1501",
                ErrorKind::ShapeMismatch,
                format!("time matrix has size {time}, distance matrix has size {distance}"),
                "provide 'time' and 'distance' of the same size".to_string(),
            ))
        }
    })
}

fn check_e1502_point_indices(problem: &Problem) -> Result<(), FormatError> {
    let size = problem.matrices.iter().filter_map(|matrix| get_matrix_size(&matrix.time)).min().unwrap_or(0) as i64;
    let is_invalid = |index: Option<i64>| index.is_some_and(|index| index < 0 || index >= size);

    let services = problem
        .services
        .iter()
        .filter(|service| is_invalid(service.matrix_index))
        .map(|service| format!("service '{}'", service.id.clone().unwrap_or_default()));
    let vehicles = problem
        .vehicles
        .iter()
        .filter(|vehicle| is_invalid(vehicle.start_index) || is_invalid(vehicle.end_index))
        .map(|vehicle| format!("vehicle '{}'", vehicle.id.clone().unwrap_or_default()));

    let invalid = services.chain(vehicles).collect::<Vec<_>>();

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(FormatError::new(
            "E1502",
            ErrorKind::IndexOutOfRange,
            format!("point index is outside of [0, {size})"),
            format!("fix point indices of: {}", invalid.join(", ")),
        ))
    }
}

fn check_e1503_vehicle_matrix_groups(problem: &Problem) -> Result<(), FormatError> {
    let groups = problem.matrices.len() as i64;
    let invalid = problem
        .vehicles
        .iter()
        .filter(|vehicle| vehicle.matrix_index.is_some_and(|idx| idx < 0 || idx >= groups))
        .map(|vehicle| vehicle.id.clone().unwrap_or_default())
        .collect::<Vec<_>>();

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(FormatError::new(
            "E1503",
            ErrorKind::IndexOutOfRange,
            format!("vehicle refers to matrix group outside of [0, {groups})"),
            format!("fix 'matrixIndex' of vehicles: '{}'", invalid.join(", ")),
        ))
    }
}
