#[cfg(test)]
#[path = "../../../tests/unit/format/solution/writer_test.rs"]
mod writer_test;

use crate::format::problem::{Problem, Route, ServiceIndex};
use crate::format::{ErrorKind, FormatError, MultiFormatError};
use serde::{Deserialize, Serialize};
use std::io::{BufWriter, Write};
use vrp_seed_core::models::DataModel;

/// A solution expressed in external ids. Its routes can be fed back as problem routes.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    /// Non-empty vehicle routes.
    pub routes: Vec<Route>,
    /// Ids of services which are not assigned to any vehicle.
    pub unassigned: Vec<String>,
}

/// Maps paths of the data model back to external ids.
pub fn create_solution(
    problem: &Problem,
    index: &ServiceIndex,
    model: &DataModel,
) -> Result<Solution, MultiFormatError> {
    let get_id = |service: usize| {
        index.get_id(service).map(|id| id.to_string()).ok_or_else(|| {
            FormatError::new(
                "E1701",
                ErrorKind::IndexOutOfRange,
                format!("solution refers to unknown service index {service}"),
                "check optimizer output".to_string(),
            )
        })
    };

    let mut routes = Vec::new();
    for vehicle in 0..model.paths.rows() {
        let service_ids = model
            .paths
            .row(vehicle)
            .iter()
            .filter(|&&service| service >= 0)
            .map(|&service| get_id(service as usize))
            .collect::<Result<Vec<_>, _>>()?;

        if service_ids.is_empty() {
            continue;
        }

        let vehicle_id = problem.vehicles.get(vehicle).and_then(|vehicle| vehicle.id.clone()).ok_or_else(|| {
            FormatError::new(
                "E1701",
                ErrorKind::IndexOutOfRange,
                format!("solution refers to unknown vehicle index {vehicle}"),
                "check optimizer output".to_string(),
            )
        })?;

        routes.push(Route { vehicle_id, service_ids });
    }

    let unassigned = model.unassigned_services.iter().map(|&service| get_id(service)).collect::<Result<Vec<_>, _>>()?;

    Ok(Solution { routes, unassigned })
}

/// Writes solution as json.
pub fn write_solution<W: Write>(solution: &Solution, writer: &mut BufWriter<W>) -> Result<(), MultiFormatError> {
    serde_json::to_writer_pretty(writer, solution).map_err(|err| {
        FormatError::new_with_details(
            "E1702",
            ErrorKind::TypeMismatch,
            "cannot write solution".to_string(),
            "check output destination".to_string(),
            err.to_string(),
        )
        .into()
    })
}

/// Reads solution from json.
pub fn deserialize_solution<R: std::io::Read>(reader: std::io::BufReader<R>) -> Result<Solution, MultiFormatError> {
    serde_json::from_reader(reader).map_err(|err| {
        FormatError::new_with_details(
            "E1702",
            ErrorKind::TypeMismatch,
            "cannot read solution".to_string(),
            "check solution json".to_string(),
            err.to_string(),
        )
        .into()
    })
}
