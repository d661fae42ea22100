#[cfg(test)]
#[path = "../../../tests/unit/format/problem/service_reader_test.rs"]
mod service_reader_test;

use super::*;
use crate::format::{ErrorKind, FormatError, MultiFormatError};
use crate::utils::combine_format_checks;
use vrp_seed_core::models::{Grid, SENTINEL_F64, ServiceAttributes};
use vrp_seed_core::utils::InfoLogger;

/// A flattened time window: start, end and max lateness.
type WindowRow = (f64, f64, f64);

/// Returns capacity dimensionality: the longest vehicle capacity vector, at least one.
pub fn get_num_units(problem: &Problem) -> usize {
    problem.vehicles.iter().map(|vehicle| vehicle.capacities.as_ref().map_or(0, |c| c.len())).max().unwrap_or(0).max(1)
}

/// Checks that services can be flattened.
pub fn verify_services(problem: &Problem) -> Result<(), MultiFormatError> {
    combine_format_checks(&[
        check_e1300_required_fields(problem),
        check_e1301_sticky_vehicle_indices(problem),
        check_e1302_sticky_vehicle_ids(problem),
        check_e1303_time_window_order(problem),
    ])
}

/// Flattens services and vehicle rests into arrays aligned with service index.
pub fn read_service_attributes(
    problem: &Problem,
    index: &ServiceIndex,
    logger: &InfoLogger,
) -> Result<ServiceAttributes, MultiFormatError> {
    let num_units = get_num_units(problem);
    let size = index.len();

    let mut attributes = ServiceAttributes {
        num_units,
        num_real_services: index.num_real(),
        ..ServiceAttributes::default()
    };
    let mut windows = Vec::with_capacity(size);
    let mut volumes = Vec::with_capacity(size);

    for global in 0..size {
        match index.get_source(global) {
            Some(ServiceSource::Visit { service: position, visit }) => {
                let service = &problem.services[position];

                let quantities = service.quantities.clone().unwrap_or_default();
                if quantities.len() > num_units && visit == 0 {
                    (logger)(&format!(
                        "service '{}' has {} quantities, only first {num_units} are used",
                        index.get_id(global).unwrap_or_default(),
                        quantities.len()
                    ));
                }

                attributes.matrix_index.push(position as i32);
                attributes.durations.push(service.duration.unwrap_or(0.));
                attributes.setup_durations.push(service.setup_duration.unwrap_or(0.));
                attributes.sticky_vehicles.push(get_sticky_vehicles(service, index));
                attributes.is_break.push(false);
                windows.push(get_service_windows(service));
                volumes.push(quantities);
            }
            Some(ServiceSource::Rest { vehicle, rest }) => {
                let rest = problem.vehicles[vehicle].rests.iter().flatten().nth(rest).cloned().unwrap_or_default();
                let late_multiplier = rest.late_multiplier.unwrap_or(0.);

                attributes.matrix_index.push(-1);
                attributes.durations.push(rest.duration.unwrap_or(0.));
                attributes.setup_durations.push(0.);
                attributes.sticky_vehicles.push(vec![vehicle]);
                attributes.is_break.push(true);
                windows.push(rest.time_window.as_ref().map_or_else(
                    || vec![unbounded_window()],
                    |tw| vec![flatten_window(tw, late_multiplier)],
                ));
                volumes.push(vec![]);
            }
            None => {
                return Err(FormatError::new(
                    "E0002",
                    ErrorKind::MissingRequiredField,
                    format!("service index has no source for index {global}"),
                    "rebuild service index from the same problem".to_string(),
                )
                .into());
            }
        }
    }

    let width = windows.iter().map(|windows| windows.len()).max().unwrap_or(1);
    let split = |select: fn(&WindowRow) -> f64| -> Vec<Vec<f64>> {
        windows.iter().map(|row| row.iter().map(select).collect()).collect()
    };

    attributes.start_tw = Grid::from_rows_with_width(split(|window: &WindowRow| window.0), width, SENTINEL_F64);
    attributes.end_tw = Grid::from_rows_with_width(split(|window: &WindowRow| window.1), width, SENTINEL_F64);
    attributes.max_lateness = Grid::from_rows_with_width(split(|window: &WindowRow| window.2), width, 0.);
    attributes.volumes = Grid::from_rows_with_width(volumes, num_units, 0.);

    (logger)(&format!(
        "services flattened: {} visits, {} rests, {width} time windows, {num_units} units",
        attributes.num_real_services,
        size - attributes.num_real_services
    ));

    Ok(attributes)
}

fn unbounded_window() -> WindowRow {
    (0., SENTINEL_F64, 0.)
}

fn flatten_window(tw: &TimeWindow, late_multiplier: f64) -> WindowRow {
    let max_lateness = if late_multiplier > 0. { tw.maximum_lateness.unwrap_or(0.) } else { 0. };

    (tw.start.unwrap_or(0.), tw.end.unwrap_or(SENTINEL_F64), max_lateness)
}

fn get_service_windows(service: &Service) -> Vec<WindowRow> {
    let late_multiplier = service.late_multiplier.unwrap_or(0.);

    match service.time_windows.as_ref() {
        Some(time_windows) if !time_windows.is_empty() => {
            time_windows.iter().map(|tw| flatten_window(tw, late_multiplier)).collect()
        }
        _ => vec![unbounded_window()],
    }
}

fn get_sticky_vehicles(service: &Service, index: &ServiceIndex) -> Vec<usize> {
    let by_index = service.vehicle_indices.iter().flatten().filter_map(|&idx| usize::try_from(idx).ok());
    let by_id = service.sticky_vehicle_ids.iter().flatten().filter_map(|id| index.get_vehicle_index(id));

    let mut vehicles = by_index.chain(by_id).collect::<Vec<_>>();
    vehicles.sort_unstable();
    vehicles.dedup();

    vehicles
}

fn check_e1300_required_fields(problem: &Problem) -> Result<(), FormatError> {
    let incomplete = problem
        .services
        .iter()
        .enumerate()
        .filter(|(_, service)| service.id.is_none() || service.matrix_index.is_none() || service.time_windows.is_none())
        .map(|(position, service)| service.id.clone().unwrap_or_else(|| format!("#{position}")))
        .collect::<Vec<_>>();

    if incomplete.is_empty() {
        Ok(())
    } else {
        Err(FormatError::new(
            "E1300",
            ErrorKind::MissingRequiredField,
            "service has no 'id', 'matrixIndex' or 'timeWindows'".to_string(),
            format!("add missing fields to services: '{}'", incomplete.join(", ")),
        ))
    }
}

fn check_e1301_sticky_vehicle_indices(problem: &Problem) -> Result<(), FormatError> {
    let num_vehicle = problem.vehicles.len() as i64;
    let invalid = problem
        .services
        .iter()
        .filter(|service| service.vehicle_indices.iter().flatten().any(|&idx| idx < 0 || idx >= num_vehicle))
        .map(|service| service.id.clone().unwrap_or_default())
        .collect::<Vec<_>>();

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(FormatError::new(
            "E1301",
            ErrorKind::IndexOutOfRange,
            format!("service refers to vehicle index outside of [0, {num_vehicle})"),
            format!("fix 'vehicleIndices' of services: '{}'", invalid.join(", ")),
        ))
    }
}

fn check_e1302_sticky_vehicle_ids(problem: &Problem) -> Result<(), FormatError> {
    let known = problem.vehicles.iter().filter_map(|vehicle| vehicle.id.as_ref()).collect::<Vec<_>>();
    let unknown = problem
        .services
        .iter()
        .flat_map(|service| service.sticky_vehicle_ids.iter().flatten())
        .filter(|id| !known.contains(id))
        .cloned()
        .collect::<Vec<_>>();

    if unknown.is_empty() {
        Ok(())
    } else {
        Err(FormatError::new(
            "E1302",
            ErrorKind::DanglingReference,
            "service refers to unknown vehicle id".to_string(),
            format!("remove from 'stickyVehicleIds' or add vehicles, ids: '{}'", unknown.join(", ")),
        ))
    }
}

fn check_e1303_time_window_order(problem: &Problem) -> Result<(), FormatError> {
    let is_invalid = |tw: &TimeWindow| {
        let (start, end, _) = flatten_window(tw, 0.);
        end != SENTINEL_F64 && end < start
    };

    let service_ids = problem
        .services
        .iter()
        .filter(|service| service.time_windows.iter().flatten().any(is_invalid))
        .map(|service| service.id.clone().unwrap_or_default());
    let rest_ids = problem
        .vehicles
        .iter()
        .flat_map(|vehicle| vehicle.rests.iter().flatten())
        .filter(|rest| rest.time_window.as_ref().is_some_and(is_invalid))
        .map(|rest| rest.id.clone().unwrap_or_else(|| "rest".to_string()));

    let invalid = service_ids.chain(rest_ids).collect::<Vec<_>>();

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(FormatError::new(
            "E1303",
            ErrorKind::ShapeMismatch,
            "time window ends before it starts".to_string(),
            format!("fix time windows of: '{}'", invalid.join(", ")),
        ))
    }
}
