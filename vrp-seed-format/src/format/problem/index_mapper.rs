#[cfg(test)]
#[path = "../../../tests/unit/format/problem/index_mapper_test.rs"]
mod index_mapper_test;

use super::model::*;
use crate::format::{ErrorKind, FormatError, MultiFormatError};
use crate::utils::get_duplicates;
use rustc_hash::FxHashMap;

/// Specifies where a global service index comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServiceSource {
    /// A visit of a problem service.
    Visit {
        /// Service position in the problem.
        service: usize,
        /// Visit number of the service.
        visit: usize,
    },
    /// A vehicle rest.
    Rest {
        /// Vehicle index.
        vehicle: usize,
        /// Rest position in the vehicle's rests.
        rest: usize,
    },
}

/// Keeps a bijection between global service indices and external ids. Real service visits come
/// first in problem order, vehicle rests follow them in vehicle order.
#[derive(Clone, Debug, Default)]
pub struct ServiceIndex {
    index_to_id: Vec<String>,
    id_to_index: FxHashMap<String, usize>,
    sources: Vec<ServiceSource>,
    source_positions: FxHashMap<String, usize>,
    visits: FxHashMap<String, Vec<usize>>,
    vehicle_index: FxHashMap<String, usize>,
    num_real: usize,
}

impl ServiceIndex {
    /// Creates a new instance of `ServiceIndex`.
    pub fn new(problem: &Problem) -> Result<Self, MultiFormatError> {
        let entries = generate_entries(problem)?;

        let mut index = Self::default();

        for (global, (id, source)) in entries.into_iter().enumerate() {
            if let ServiceSource::Visit { service, .. } = source {
                let base_id = problem.services[service].id.clone().unwrap_or_default();
                index.source_positions.insert(id.clone(), service);
                index.source_positions.insert(base_id.clone(), service);
                index.visits.entry(base_id).or_default().push(global);
                index.num_real += 1;
            }

            index.id_to_index.insert(id.clone(), global);
            index.index_to_id.push(id);
            index.sources.push(source);
        }

        index.vehicle_index = problem
            .vehicles
            .iter()
            .enumerate()
            .filter_map(|(idx, vehicle)| vehicle.id.as_ref().map(|id| (id.clone(), idx)))
            .collect();

        Ok(index)
    }

    /// Returns external id of global index.
    pub fn get_id(&self, index: usize) -> Option<&str> {
        self.index_to_id.get(index).map(|id| id.as_str())
    }

    /// Returns global index of external id.
    pub fn get_index(&self, id: &str) -> Option<usize> {
        self.id_to_index.get(id).copied()
    }

    /// Returns source of global index.
    pub fn get_source(&self, index: usize) -> Option<ServiceSource> {
        self.sources.get(index).copied()
    }

    /// Returns problem position of the service which owns a visit id or a base service id.
    pub fn get_source_position(&self, id: &str) -> Option<usize> {
        self.source_positions.get(id).copied()
    }

    /// Returns global indices of all visits of a service with given base id.
    pub fn get_visits(&self, base_id: &str) -> Option<&[usize]> {
        self.visits.get(base_id).map(|visits| visits.as_slice())
    }

    /// Returns vehicle index by vehicle id.
    pub fn get_vehicle_index(&self, vehicle_id: &str) -> Option<usize> {
        self.vehicle_index.get(vehicle_id).copied()
    }

    /// Returns global indices of rests owned by given vehicle.
    pub fn get_rests(&self, vehicle_idx: usize) -> impl Iterator<Item = usize> + '_ {
        (self.num_real..self.sources.len()).filter(move |&index| {
            matches!(self.sources[index], ServiceSource::Rest { vehicle, .. } if vehicle == vehicle_idx)
        })
    }

    /// Returns amount of real service visits.
    pub fn num_real(&self) -> usize {
        self.num_real
    }

    /// Returns total amount of indices.
    pub fn len(&self) -> usize {
        self.index_to_id.len()
    }

    /// Returns true if there are no indices.
    pub fn is_empty(&self) -> bool {
        self.index_to_id.is_empty()
    }
}

/// Checks that every id can be generated and ids are unique.
pub fn verify_index(problem: &Problem) -> Result<(), MultiFormatError> {
    generate_entries(problem).map(|_| ())
}

fn generate_entries(problem: &Problem) -> Result<Vec<(String, ServiceSource)>, MultiFormatError> {
    let missing = problem
        .services
        .iter()
        .enumerate()
        .filter(|(_, service)| service.id.is_none())
        .map(|(position, _)| position.to_string())
        .collect::<Vec<_>>();

    if !missing.is_empty() {
        return Err(FormatError::new(
            "E1200",
            ErrorKind::MissingIdentifier,
            "service has no id".to_string(),
            format!("add id to services at positions: '{}'", missing.join(", ")),
        )
        .into());
    }

    let visits = problem.services.iter().enumerate().flat_map(|(service, job)| {
        let id = job.id.clone().unwrap_or_default();
        let count = job.visits();

        (0..count).map(move |visit| {
            let id = if count > 1 { format!("{id}_{visit}") } else { id.clone() };
            (id, ServiceSource::Visit { service, visit })
        })
    });

    let rests = problem
        .vehicles
        .iter()
        .enumerate()
        .flat_map(|(vehicle, shift)| {
            shift.rests.iter().flatten().enumerate().map(move |(rest, break_)| (vehicle, rest, break_.id.clone()))
        })
        .enumerate()
        .map(|(counter, (vehicle, rest, id))| {
            (id.unwrap_or_else(|| format!("rest_{counter}")), ServiceSource::Rest { vehicle, rest })
        });

    let entries = visits.chain(rests).collect::<Vec<_>>();

    let duplicates = get_duplicates(entries.iter().map(|(id, _)| id));
    if !duplicates.is_empty() {
        return Err(FormatError::new(
            "E1201",
            ErrorKind::ShapeMismatch,
            "duplicated service, visit or rest ids".to_string(),
            format!(
                "make ids unique, duplicates: '{}'",
                duplicates.into_iter().cloned().collect::<Vec<_>>().join(", ")
            ),
        )
        .into());
    }

    Ok(entries)
}
