#[cfg(test)]
#[path = "../../tests/unit/models/data_model_test.rs"]
mod data_model_test;

use super::*;
use crate::utils::GenericResult;

/// An aggregate of normalized problem attributes and the seed solution handed to an optimizer.
///
/// An optimizer is expected to change only `paths` and `unassigned_services`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataModel {
    /// Service attributes.
    pub services: ServiceAttributes,
    /// Vehicle attributes.
    pub vehicles: VehicleAttributes,
    /// Augmented travel matrices.
    pub matrices: MatrixAttributes,
    /// Service index per vehicle and position, `-1` marks an empty slot.
    pub paths: Grid<i32>,
    /// Real services which are not present in any path.
    pub unassigned_services: Vec<usize>,
}

impl DataModel {
    /// Returns amount of services, rests included.
    pub fn num_services(&self) -> usize {
        self.services.num_services()
    }

    /// Returns amount of vehicles.
    pub fn num_vehicle(&self) -> usize {
        self.vehicles.num_vehicle()
    }

    /// Checks that all arrays agree on service and vehicle counts and that paths reference every
    /// service at most once.
    pub fn verify(&self) -> GenericResult<()> {
        let num_services = self.num_services();
        let num_vehicle = self.num_vehicle();
        let services = &self.services;
        let vehicles = &self.vehicles;

        let service_lengths = [
            ("matrix_index", services.matrix_index.len()),
            ("start_tw", services.start_tw.rows()),
            ("end_tw", services.end_tw.rows()),
            ("max_lateness", services.max_lateness.rows()),
            ("setup_durations", services.setup_durations.len()),
            ("volumes", services.volumes.rows()),
            ("sticky_vehicles", services.sticky_vehicles.len()),
            ("is_break", services.is_break.len()),
        ];

        let vehicle_lengths = [
            ("capacities", vehicles.capacities.rows()),
            ("overload_multiplier", vehicles.overload_multiplier.rows()),
            ("cost_time_multiplier", vehicles.cost_time_multiplier.len()),
            ("cost_distance_multiplier", vehicles.cost_distance_multiplier.len()),
            ("fixed_cost", vehicles.fixed_cost.len()),
            ("tw_end", vehicles.tw_end.len()),
            ("tw_margin", vehicles.tw_margin.len()),
            ("max_distance", vehicles.max_distance.len()),
            ("max_duration", vehicles.max_duration.len()),
            ("start_index", vehicles.start_index.len()),
            ("end_index", vehicles.end_index.len()),
            ("matrix_index", vehicles.matrix_index.len()),
            ("start_mode", vehicles.start_mode.len()),
            ("force_end", vehicles.force_end.len()),
            ("free_approach", vehicles.free_approach.len()),
            ("free_return", vehicles.free_return.len()),
            ("previous_vehicle", vehicles.previous_vehicle.len()),
            ("start_node", self.matrices.start_node.len()),
            ("end_node", self.matrices.end_node.len()),
            ("paths", self.paths.rows()),
        ];

        if let Some((name, length)) = service_lengths.iter().find(|(_, length)| *length != num_services) {
            return Err(format!("length of '{name}' is {length}, expected {num_services} services").into());
        }

        if let Some((name, length)) = vehicle_lengths.iter().find(|(_, length)| *length != num_vehicle) {
            return Err(format!("length of '{name}' is {length}, expected {num_vehicle} vehicles").into());
        }

        if services.num_real_services > num_services {
            return Err(format!("{} real services exceed total {num_services}", services.num_real_services).into());
        }

        if services.is_break.iter().enumerate().any(|(idx, &is_break)| is_break != (idx >= services.num_real_services))
        {
            return Err("rests must follow all real services".into());
        }

        if services.volumes.cols() != services.num_units || vehicles.capacities.cols() != services.num_units {
            return Err(format!("capacity dimensions differ from {} units", services.num_units).into());
        }

        if let Some(vehicle) = (0..num_vehicle).find(|&vehicle| vehicles.chain_length(vehicle).is_none()) {
            return Err(format!("vehicle chain starting at {vehicle} is cyclic").into());
        }

        let mut has_successor = vec![false; num_vehicle];
        for &previous in vehicles.previous_vehicle.iter().filter(|&&previous| previous >= 0) {
            match has_successor.get_mut(previous as usize) {
                Some(flag) if !*flag => *flag = true,
                Some(_) => return Err(format!("vehicle {previous} is followed by more than one vehicle").into()),
                None => return Err(format!("previous vehicle {previous} is unknown").into()),
            }
        }

        let dimension = self.matrices.dimension();
        let all_square = self
            .matrices
            .time
            .iter()
            .chain(self.matrices.distance.iter())
            .all(|matrix| matrix.is_square() && matrix.rows() == dimension);
        if !all_square || self.matrices.time.len() != self.matrices.distance.len() {
            return Err("time and distance matrices must be square and of the same dimension".into());
        }

        let mut seen = vec![false; num_services];
        for &value in self.paths.values().filter(|&&value| value >= 0) {
            match seen.get_mut(value as usize) {
                Some(flag) if !*flag => *flag = true,
                Some(_) => return Err(format!("service {value} is referenced by paths more than once").into()),
                None => return Err(format!("paths reference unknown service {value}").into()),
            }
        }

        Ok(())
    }
}
