#[cfg(test)]
#[path = "../../../tests/unit/format/problem/vehicle_reader_test.rs"]
mod vehicle_reader_test;

use super::*;
use crate::format::{ErrorKind, FormatError, MultiFormatError};
use crate::utils::{combine_format_checks, get_duplicates};
use rustc_hash::FxHashMap;
use vrp_seed_core::models::{Grid, SENTINEL, SENTINEL_F64, StartMode, UNLIMITED_CAPACITY, VehicleAttributes};
use vrp_seed_core::utils::InfoLogger;

/// Checks that vehicles can be flattened and trip chains resolved.
pub fn verify_vehicles(problem: &Problem) -> Result<(), MultiFormatError> {
    if problem.vehicles.is_empty() {
        return Err(FormatError::new(
            "E1400",
            ErrorKind::MissingCollection,
            "problem has no vehicles".to_string(),
            "add at least one vehicle".to_string(),
        )
        .into());
    }

    combine_format_checks(&[
        check_e1401_vehicle_ids(problem),
        check_e1404_unique_vehicle_ids(problem),
        check_e1405_shift_window_order(problem),
    ])?;

    let vehicle_index = get_vehicle_index(problem);
    check_e1402_trip_vehicles_exist(problem, &vehicle_index)?;
    get_previous_vehicles(problem, &vehicle_index)?;

    Ok(())
}

/// Flattens vehicles into arrays aligned with vehicle index.
pub fn read_vehicle_attributes(problem: &Problem, logger: &InfoLogger) -> Result<VehicleAttributes, MultiFormatError> {
    let num_units = get_num_units(problem);
    let vehicle_index = get_vehicle_index(problem);
    let previous_vehicle = get_previous_vehicles(problem, &vehicle_index)?;

    let (capacities, overload_multiplier): (Vec<_>, Vec<_>) =
        problem.vehicles.iter().map(|vehicle| get_capacities(vehicle, num_units)).unzip();

    let attributes = VehicleAttributes {
        capacities: Grid::from_rows_with_width(capacities, num_units, 0.),
        overload_multiplier: Grid::from_rows_with_width(overload_multiplier, num_units, 0.),
        cost_time_multiplier: map_vehicles(problem, |vehicle| vehicle.cost_time_multiplier.unwrap_or(0.)),
        cost_distance_multiplier: map_vehicles(problem, |vehicle| vehicle.cost_distance_multiplier.unwrap_or(0.)),
        fixed_cost: map_vehicles(problem, |vehicle| vehicle.cost_fixed.unwrap_or(0.)),
        tw_start: map_vehicles(problem, |vehicle| vehicle.time_window.as_ref().and_then(|tw| tw.start).unwrap_or(0.)),
        tw_end: map_vehicles(problem, |vehicle| {
            vehicle.time_window.as_ref().and_then(|tw| tw.end).unwrap_or(SENTINEL_F64)
        }),
        tw_margin: map_vehicles(problem, |vehicle| match vehicle.cost_late_multiplier {
            Some(multiplier) if multiplier > 0. => {
                vehicle.time_window.as_ref().and_then(|tw| tw.maximum_lateness).unwrap_or(0.)
            }
            _ => 0.,
        }),
        max_distance: map_vehicles(problem, |vehicle| get_limit(vehicle.distance)),
        max_duration: map_vehicles(problem, |vehicle| get_limit(vehicle.duration)),
        start_index: map_vehicles(problem, |vehicle| to_point(vehicle.start_index)),
        end_index: map_vehicles(problem, |vehicle| to_point(vehicle.end_index)),
        matrix_index: map_vehicles(problem, |vehicle| {
            vehicle.matrix_index.and_then(|idx| usize::try_from(idx).ok()).unwrap_or(0)
        }),
        start_mode: map_vehicles(problem, |vehicle| match vehicle.shift_preference {
            Some(ShiftPreference::ForceStart) => StartMode::AtWindowStart,
            _ => StartMode::Free,
        }),
        force_end: map_vehicles(problem, |vehicle| vehicle.shift_preference == Some(ShiftPreference::ForceEnd)),
        free_approach: map_vehicles(problem, |vehicle| vehicle.free_approach.unwrap_or(false)),
        free_return: map_vehicles(problem, |vehicle| vehicle.free_return.unwrap_or(false)),
        previous_vehicle,
        max_capacity: problem
            .vehicles
            .first()
            .and_then(|vehicle| vehicle.capacities.as_ref())
            .and_then(|capacities| capacities.first())
            .map_or(UNLIMITED_CAPACITY, |capacity| capacity.limit),
    };

    let chained = attributes.previous_vehicle.iter().filter(|&&previous| previous != SENTINEL).count();
    (logger)(&format!("vehicles flattened: {} vehicles, {chained} chained", attributes.num_vehicle()));

    Ok(attributes)
}

fn map_vehicles<T, F: Fn(&Vehicle) -> T>(problem: &Problem, map_fn: F) -> Vec<T> {
    problem.vehicles.iter().map(map_fn).collect()
}

fn get_vehicle_index(problem: &Problem) -> FxHashMap<&str, usize> {
    problem.vehicles.iter().enumerate().filter_map(|(idx, vehicle)| vehicle.id.as_deref().map(|id| (id, idx))).collect()
}

fn get_capacities(vehicle: &Vehicle, num_units: usize) -> (Vec<f64>, Vec<f64>) {
    match vehicle.capacities.as_ref() {
        Some(capacities) if !capacities.is_empty() => (
            capacities.iter().map(|capacity| capacity.limit).collect(),
            capacities.iter().map(|capacity| capacity.overload_multiplier.unwrap_or(0.)).collect(),
        ),
        _ => (vec![SENTINEL_F64; num_units], vec![0.; num_units]),
    }
}

fn get_limit(limit: Option<f64>) -> f64 {
    match limit {
        Some(value) if value > 0. => value,
        _ => SENTINEL_F64,
    }
}

fn to_point(index: Option<i64>) -> i32 {
    index.and_then(|index| i32::try_from(index).ok()).unwrap_or(0)
}

/// Resolves `vehicle_trips` relations into predecessor per vehicle. Chains sharing a vehicle are
/// joined, a vehicle with two different predecessors, two different successors or a cycle is rejected.
fn get_previous_vehicles(problem: &Problem, vehicle_index: &FxHashMap<&str, usize>) -> Result<Vec<i32>, FormatError> {
    let mut previous = vec![SENTINEL; problem.vehicles.len()];
    let mut next = vec![SENTINEL; problem.vehicles.len()];
    let mut conflicts = Vec::new();

    for relation in problem.vehicle_trips() {
        let chain = relation.linked_vehicle_ids.iter().filter_map(|id| vehicle_index.get(id.as_str()).copied());
        let mut seen = Vec::with_capacity(relation.linked_vehicle_ids.len());

        for vehicle in chain {
            if seen.contains(&vehicle) {
                conflicts.push(vehicle);
            } else if let Some(&predecessor) = seen.last() {
                if previous[vehicle] != SENTINEL && previous[vehicle] != predecessor as i32 {
                    conflicts.push(vehicle);
                }
                if next[predecessor] != SENTINEL && next[predecessor] != vehicle as i32 {
                    conflicts.push(predecessor);
                }
                previous[vehicle] = predecessor as i32;
                next[predecessor] = vehicle as i32;
            }
            seen.push(vehicle);
        }
    }

    let attributes = VehicleAttributes { previous_vehicle: previous, ..VehicleAttributes::default() };
    conflicts.extend((0..problem.vehicles.len()).filter(|&vehicle| attributes.chain_length(vehicle).is_none()));
    conflicts.sort_unstable();
    conflicts.dedup();

    if conflicts.is_empty() {
        Ok(attributes.previous_vehicle)
    } else {
        let ids = conflicts.iter().filter_map(|&idx| problem.vehicles[idx].id.clone()).collect::<Vec<_>>();
        Err(FormatError::new(
            "E1403",
            ErrorKind::UnsupportedFeature,
            "vehicle trips form a cycle or a vehicle belongs to more than one chain".to_string(),
            format!("make every vehicle trip chain linear, vehicles: '{}'", ids.join(", ")),
        ))
    }
}

fn check_e1401_vehicle_ids(problem: &Problem) -> Result<(), FormatError> {
    let missing = problem
        .vehicles
        .iter()
        .enumerate()
        .filter(|(_, vehicle)| vehicle.id.is_none())
        .map(|(idx, _)| idx.to_string())
        .collect::<Vec<_>>();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(FormatError::new(
            "E1401",
            ErrorKind::MissingIdentifier,
            "vehicle has no id".to_string(),
            format!("add id to vehicles at positions: '{}'", missing.join(", ")),
        ))
    }
}

fn check_e1402_trip_vehicles_exist(
    problem: &Problem,
    vehicle_index: &FxHashMap<&str, usize>,
) -> Result<(), FormatError> {
    let unknown = problem
        .vehicle_trips()
        .flat_map(|relation| relation.linked_vehicle_ids.iter())
        .filter(|id| !vehicle_index.contains_key(id.as_str()))
        .cloned()
        .collect::<Vec<_>>();

    if unknown.is_empty() {
        Ok(())
    } else {
        Err(FormatError::new(
            "E1402",
            ErrorKind::DanglingReference,
            "vehicle trips relation has unknown vehicle id".to_string(),
            format!("remove from relation or add vehicles, ids: '{}'", unknown.join(", ")),
        ))
    }
}

fn check_e1404_unique_vehicle_ids(problem: &Problem) -> Result<(), FormatError> {
    let duplicates = get_duplicates(problem.vehicles.iter().filter_map(|vehicle| vehicle.id.as_ref()));

    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(FormatError::new(
            "E1404",
            ErrorKind::ShapeMismatch,
            "duplicated vehicle ids".to_string(),
            format!(
                "make vehicle ids unique, duplicates: '{}'",
                duplicates.into_iter().cloned().collect::<Vec<_>>().join(", ")
            ),
        ))
    }
}

fn check_e1405_shift_window_order(problem: &Problem) -> Result<(), FormatError> {
    let invalid = problem
        .vehicles
        .iter()
        .filter(|vehicle| match vehicle.time_window.as_ref() {
            Some(TimeWindow { start, end: Some(end), .. }) => *end != SENTINEL_F64 && *end < start.unwrap_or(0.),
            _ => false,
        })
        .map(|vehicle| vehicle.id.clone().unwrap_or_default())
        .collect::<Vec<_>>();

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(FormatError::new(
            "E1405",
            ErrorKind::ShapeMismatch,
            "vehicle shift time window ends before it starts".to_string(),
            format!("fix time windows of vehicles: '{}'", invalid.join(", ")),
        ))
    }
}
