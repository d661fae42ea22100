#[cfg(test)]
#[path = "../../tests/unit/validation/features_test.rs"]
mod features_test;

use super::*;
use crate::utils::combine_error_results;

const SEQUENCE_RELATIONS: [&str; 2] = ["order", "sequence"];
const POSITION_RELATIONS: [&str; 4] = ["never_first", "never_last", "always_first", "always_last"];
const ACTIVITY_POSITIONS: [&str; 3] = ["always_first", "always_last", "never_first"];

/// Validates that problem does not request unsupported routing features.
pub fn validate_features(record: &Map<String, Value>) -> Result<(), Vec<FormatError>> {
    combine_error_results(&[
        check_e1100_sequence_relations(record),
        check_e1101_position_relations(record),
        check_e1102_activity_positions(record),
    ])
}

fn get_relation_types<'a>(record: &'a Map<String, Value>, types: &'a [&str]) -> Vec<&'a str> {
    let mut found = get_entries(record, "relations")
        .filter_map(|(_, relation)| relation.get("type").and_then(|kind| kind.as_str()))
        .filter(|kind| types.contains(kind))
        .collect::<Vec<_>>();
    found.sort_unstable();
    found.dedup();

    found
}

fn has_unsupported_position(activity: &Value) -> bool {
    ["position", "positions"].iter().filter_map(|key| activity.get(*key)).any(|position| match position {
        Value::String(position) => ACTIVITY_POSITIONS.contains(&position.as_str()),
        Value::Array(positions) => {
            positions.iter().filter_map(|position| position.as_str()).any(|name| ACTIVITY_POSITIONS.contains(&name))
        }
        _ => false,
    })
}

fn check_e1100_sequence_relations(record: &Map<String, Value>) -> Result<(), FormatError> {
    let found = get_relation_types(record, &SEQUENCE_RELATIONS);

    if found.is_empty() {
        Ok(())
    } else {
        Err(FormatError::new(
            "E1100",
            ErrorKind::UnsupportedFeature,
            format!("sequencing relations are not supported: '{}'", found.join(", ")),
            "remove relations of these types".to_string(),
        ))
    }
}

fn check_e1101_position_relations(record: &Map<String, Value>) -> Result<(), FormatError> {
    let found = get_relation_types(record, &POSITION_RELATIONS);

    if found.is_empty() {
        Ok(())
    } else {
        Err(FormatError::new(
            "E1101",
            ErrorKind::UnsupportedFeature,
            format!("positional relations are not supported: '{}'", found.join(", ")),
            "remove relations of these types".to_string(),
        ))
    }
}

fn check_e1102_activity_positions(record: &Map<String, Value>) -> Result<(), FormatError> {
    let invalid = get_entries(record, "services")
        .filter(|(_, service)| {
            let activity = service.get("activity").into_iter();
            let activities = service.get("activities").and_then(|value| value.as_array()).into_iter().flatten();

            has_unsupported_position(service) || activity.chain(activities).any(has_unsupported_position)
        })
        .map(|(position, service)| describe(service, position))
        .collect::<Vec<_>>();

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(FormatError::new(
            "E1102",
            ErrorKind::UnsupportedFeature,
            "service activity position constraints are not supported".to_string(),
            format!("remove 'position' from services: '{}'", invalid.join(", ")),
        ))
    }
}
