#[cfg(test)]
#[path = "../../../tests/unit/format/solution/initial_reader_test.rs"]
mod initial_reader_test;

use crate::format::problem::{Problem, Route, ServiceIndex, ServiceSource};
use crate::format::{ErrorKind, FormatError, MultiFormatError};
use crate::utils::combine_format_checks;
use serde::Deserialize;
use vrp_seed_core::algorithms::clustering::{Clusterer, CompleteLinkage};
use vrp_seed_core::models::{Grid, MatrixAttributes, SENTINEL, ServiceAttributes};
use vrp_seed_core::utils::Environment;

/// Specifies how seed paths are built.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InitialMode {
    /// Replay routes when the problem has them, cluster otherwise.
    #[default]
    Auto,
    /// Replay routes, a problem without routes leaves all services unassigned.
    Replay,
    /// Cluster services ignoring routes.
    Clustering,
}

/// Settings of seed solution construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitialSettings {
    /// Extra slots per vehicle path left for an optimizer.
    pub path_margin: usize,
    /// Construction mode.
    pub mode: InitialMode,
}

impl Default for InitialSettings {
    fn default() -> Self {
        Self { path_margin: 10, mode: InitialMode::Auto }
    }
}

/// Seed paths and services left out of them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InitialPaths {
    /// Service index per vehicle and position, `-1` marks an empty slot.
    pub paths: Grid<i32>,
    /// Real services which are not present in any path.
    pub unassigned: Vec<usize>,
}

/// Returns routes to replay according to the mode.
pub fn get_replay_routes<'a>(problem: &'a Problem, settings: &InitialSettings) -> Option<&'a [Route]> {
    match settings.mode {
        InitialMode::Auto => problem.routes.as_deref(),
        InitialMode::Replay => Some(problem.routes.as_deref().unwrap_or(&[])),
        InitialMode::Clustering => None,
    }
}

/// Checks that matrices are usable for clustering and that replayed routes reference known ids.
pub fn verify_initial_solution(
    problem: &Problem,
    index: &ServiceIndex,
    matrices: &MatrixAttributes,
    settings: &InitialSettings,
) -> Result<(), MultiFormatError> {
    let routes = get_replay_routes(problem, settings).unwrap_or(&[]);

    combine_format_checks(&[
        check_e1600_square_matrices(matrices),
        check_e1601_route_vehicles(routes, index),
        check_e1602_route_services(routes, index),
    ])
}

/// Builds seed paths by replaying problem routes or by clustering services on travel time.
pub fn read_init_solution(
    problem: &Problem,
    index: &ServiceIndex,
    services: &ServiceAttributes,
    matrices: &MatrixAttributes,
    settings: &InitialSettings,
    environment: &Environment,
) -> Result<InitialPaths, MultiFormatError> {
    let num_vehicle = problem.vehicles.len();

    let (mut routes, unassigned) = match get_replay_routes(problem, settings) {
        Some(routes) => replay_routes(routes, index, num_vehicle, environment),
        None => cluster_services(index, services, matrices, num_vehicle, environment)?,
    };

    // rests always travel with their owner
    routes.iter_mut().enumerate().for_each(|(vehicle, route)| {
        let missing = index.get_rests(vehicle).filter(|rest| !route.contains(rest)).collect::<Vec<_>>();
        route.extend(missing);
    });

    let width = routes.iter().map(|route| route.len()).max().unwrap_or(0) + settings.path_margin;
    let rows = routes.into_iter().map(|route| route.into_iter().map(|service| service as i32).collect()).collect();
    let paths = Grid::from_rows_with_width(rows, width, SENTINEL);

    (environment.logger)(&format!(
        "initial solution: {} vehicles, path width {width}, {} unassigned",
        paths.rows(),
        unassigned.len()
    ));

    Ok(InitialPaths { paths, unassigned })
}

fn replay_routes(
    routes: &[Route],
    index: &ServiceIndex,
    num_vehicle: usize,
    environment: &Environment,
) -> (Vec<Vec<usize>>, Vec<usize>) {
    let mut placed = vec![false; index.len()];
    let mut paths = vec![Vec::new(); num_vehicle];
    let mut skipped = 0;

    for route in routes {
        let Some(vehicle) = index.get_vehicle_index(&route.vehicle_id).filter(|&vehicle| vehicle < num_vehicle) else {
            continue;
        };

        for id in route.service_ids.iter() {
            let service = match index.get_index(id) {
                Some(service) => Some(service),
                None => index.get_visits(id).and_then(|visits| visits.iter().copied().find(|&visit| !placed[visit])),
            };

            let is_allowed = |service: usize| match index.get_source(service) {
                Some(ServiceSource::Rest { vehicle: owner, .. }) => owner == vehicle,
                Some(ServiceSource::Visit { .. }) => true,
                None => false,
            };

            match service {
                Some(service) if !placed[service] && is_allowed(service) => {
                    placed[service] = true;
                    paths[vehicle].push(service);
                }
                _ => skipped += 1,
            }
        }
    }

    if skipped > 0 {
        (environment.logger)(&format!("replay skipped {skipped} duplicated or misplaced service references"));
    }

    let unassigned = (0..index.num_real()).filter(|&service| !placed[service]).collect();

    (paths, unassigned)
}

fn cluster_services(
    index: &ServiceIndex,
    services: &ServiceAttributes,
    matrices: &MatrixAttributes,
    num_vehicle: usize,
    environment: &Environment,
) -> Result<(Vec<Vec<usize>>, Vec<usize>), MultiFormatError> {
    let num_real = index.num_real();
    let mut paths = vec![Vec::new(); num_vehicle];

    if num_real == 0 || num_vehicle == 0 {
        return Ok((paths, (0..num_real).collect()));
    }

    let dissimilarity = create_dissimilarity(services, matrices, num_real)?;
    let k = num_vehicle.min(num_real);

    let labels = CompleteLinkage::new(environment.random.clone()).cluster(&dissimilarity, k).map_err(|err| {
        MultiFormatError::from(FormatError::new_with_details(
            "E1600",
            ErrorKind::ShapeMismatch,
            "cannot cluster services".to_string(),
            "check travel time matrix".to_string(),
            err.to_string(),
        ))
    })?;

    let mut relocated = 0;
    for (service, label) in labels.into_iter().enumerate() {
        let sticky = &services.sticky_vehicles[service];
        let vehicle = match sticky.first() {
            Some(&allowed) if !sticky.contains(&label) => {
                relocated += 1;
                allowed
            }
            _ => label,
        };
        paths[vehicle].push(service);
    }

    (environment.logger)(&format!(
        "clustered {num_real} services into {k} groups, {relocated} moved to sticky vehicles"
    ));

    Ok((paths, Vec::new()))
}

/// Creates symmetric travel time dissimilarity between real service visits.
fn create_dissimilarity(
    services: &ServiceAttributes,
    matrices: &MatrixAttributes,
    num_real: usize,
) -> Result<Grid<f64>, MultiFormatError> {
    let time = matrices.time.first().ok_or_else(|| square_error("no time matrix".to_string()))?;
    let rows = services.matrix_index.iter().take(num_real).map(|&row| row as usize).collect::<Vec<_>>();

    let mut dissimilarity = Grid::new(num_real, num_real, 0.);
    for (from, &from_row) in rows.iter().enumerate() {
        for (to, &to_row) in rows.iter().enumerate() {
            let forward = time.get(from_row, to_row);
            let backward = time.get(to_row, from_row);
            let (Some(&forward), Some(&backward)) = (forward, backward) else {
                return Err(square_error(format!("service row {from_row} or {to_row} is outside of time matrix")));
            };
            dissimilarity.set(from, to, forward.max(backward));
        }
    }

    Ok(dissimilarity)
}

fn square_error(cause: String) -> MultiFormatError {
    FormatError::new("E1600", ErrorKind::ShapeMismatch, cause, "check augmented matrices".to_string()).into()
}

fn check_e1600_square_matrices(matrices: &MatrixAttributes) -> Result<(), FormatError> {
    let dimension = matrices.dimension();
    let is_valid = matrices.time.len() == matrices.distance.len()
        && matrices.time.iter().chain(matrices.distance.iter()).all(|m| m.is_square() && m.rows() == dimension);

    if is_valid {
        Ok(())
    } else {
        Err(FormatError::new(
            "E1600",
            ErrorKind::ShapeMismatch,
            "time and distance matrices are not square or have different dimensions".to_string(),
            "check raw matrices".to_string(),
        ))
    }
}

fn check_e1601_route_vehicles(routes: &[Route], index: &ServiceIndex) -> Result<(), FormatError> {
    let unknown = routes
        .iter()
        .filter(|route| index.get_vehicle_index(&route.vehicle_id).is_none())
        .map(|route| route.vehicle_id.clone())
        .collect::<Vec<_>>();

    if unknown.is_empty() {
        Ok(())
    } else {
        Err(FormatError::new(
            "E1601",
            ErrorKind::DanglingReference,
            "route has unknown vehicle id".to_string(),
            format!("remove routes or add vehicles, ids: '{}'", unknown.join(", ")),
        ))
    }
}

fn check_e1602_route_services(routes: &[Route], index: &ServiceIndex) -> Result<(), FormatError> {
    let unknown = routes
        .iter()
        .flat_map(|route| route.service_ids.iter())
        .filter(|id| index.get_index(id).is_none() && index.get_visits(id).is_none())
        .cloned()
        .collect::<Vec<_>>();

    if unknown.is_empty() {
        Ok(())
    } else {
        Err(FormatError::new(
            "E1602",
            ErrorKind::DanglingReference,
            "route has unknown service id".to_string(),
            format!("remove from routes or add services, ids: '{}'", unknown.join(", ")),
        ))
    }
}
