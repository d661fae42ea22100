#[cfg(test)]
#[path = "../../tests/unit/validation/shapes_test.rs"]
mod shapes_test;

use super::*;
use crate::utils::combine_error_results;

const REQUIRED_COLLECTIONS: [&str; 3] = ["matrices", "vehicles", "services"];
const OPTIONAL_COLLECTIONS: [&str; 2] = ["relations", "routes"];

/// Validates that required fields have expected types.
pub fn validate_shapes(record: &Map<String, Value>) -> Result<(), Vec<FormatError>> {
    combine_error_results(&[
        check_e1004_collections_are_lists(record),
        check_e1001_matrix_shape(record),
        check_e1002_vehicle_shape(record),
        check_e1003_service_shape(record),
    ])
}

fn is_integer(value: Option<&Value>) -> bool {
    value.is_some_and(|value| value.is_i64() || value.is_u64())
}

fn is_number_list(value: Option<&Value>) -> bool {
    value.and_then(|value| value.as_array()).is_some_and(|values| values.iter().all(|value| value.is_number()))
}

fn check_e1004_collections_are_lists(record: &Map<String, Value>) -> Result<(), FormatError> {
    let required = REQUIRED_COLLECTIONS.iter().filter(|&&key| record.get(key).is_some_and(|value| !value.is_array()));
    let optional = OPTIONAL_COLLECTIONS
        .iter()
        .filter(|&&key| record.get(key).is_some_and(|value| !value.is_array() && !value.is_null()));
    let invalid = required.chain(optional).copied().collect::<Vec<_>>();

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(FormatError::new(
            "E1004",
            ErrorKind::TypeMismatch,
            "problem field is not a list".to_string(),
            format!("pass lists in fields: '{}'", invalid.join(", ")),
        ))
    }
}

fn check_e1001_matrix_shape(record: &Map<String, Value>) -> Result<(), FormatError> {
    let invalid = get_entries(record, "matrices")
        .filter(|(_, matrix)| !is_number_list(matrix.get("time")) || !is_number_list(matrix.get("distance")))
        .map(|(position, _)| position.to_string())
        .collect::<Vec<_>>();

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(FormatError::new(
            "E1001",
            ErrorKind::TypeMismatch,
            "matrix has no numeric 'time' or 'distance' list".to_string(),
            format!("fix matrices at positions: '{}'", invalid.join(", ")),
        ))
    }
}

fn check_e1002_vehicle_shape(record: &Map<String, Value>) -> Result<(), FormatError> {
    let invalid = get_entries(record, "vehicles")
        .filter(|(_, vehicle)| !is_integer(vehicle.get("startIndex")) || !is_integer(vehicle.get("endIndex")))
        .map(|(position, vehicle)| describe(vehicle, position))
        .collect::<Vec<_>>();

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(FormatError::new(
            "E1002",
            ErrorKind::TypeMismatch,
            "vehicle has no integer 'startIndex' or 'endIndex'".to_string(),
            format!("fix vehicles: '{}'", invalid.join(", ")),
        ))
    }
}

fn check_e1003_service_shape(record: &Map<String, Value>) -> Result<(), FormatError> {
    let invalid = get_entries(record, "services")
        .filter(|(_, service)| {
            !is_integer(service.get("matrixIndex")) || !service.get("id").is_some_and(|id| id.is_string())
        })
        .map(|(position, service)| describe(service, position))
        .collect::<Vec<_>>();

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(FormatError::new(
            "E1003",
            ErrorKind::TypeMismatch,
            "service has no integer 'matrixIndex' or string 'id'".to_string(),
            format!("fix services: '{}'", invalid.join(", ")),
        ))
    }
}
