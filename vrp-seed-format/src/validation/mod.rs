//! This module provides functionality to validate raw problem definition before it is read into
//! the typed model: required shapes and features which cannot be represented.

use crate::format::{ErrorKind, FormatError, MultiFormatError};
use serde_json::{Map, Value};

mod shapes;
use self::shapes::validate_shapes;

mod features;
use self::features::validate_features;

/// A validation context which keeps the raw problem.
pub struct ValidationContext<'a> {
    /// A raw problem definition.
    pub problem: &'a Value,
}

impl<'a> ValidationContext<'a> {
    /// Creates an instance of `ValidationContext`.
    pub fn new(problem: &'a Value) -> Self {
        Self { problem }
    }

    /// Validates problem on set of rules.
    pub fn validate(&self) -> Result<(), MultiFormatError> {
        let Some(record) = self.problem.as_object() else {
            return Err(FormatError::new(
                "E1000",
                ErrorKind::TypeMismatch,
                "problem is not a structured record".to_string(),
                "pass a json object with 'matrices', 'vehicles' and 'services'".to_string(),
            )
            .into());
        };

        let errors = [validate_shapes(record), validate_features(record)]
            .into_iter()
            .filter_map(Result::err)
            .flatten()
            .collect::<Vec<_>>();

        if errors.is_empty() { Ok(()) } else { Err(errors.into()) }
    }
}

/// Returns entries of a list field, an absent or non-list field gives no entries.
fn get_entries<'a>(record: &'a Map<String, Value>, key: &str) -> impl Iterator<Item = (usize, &'a Value)> + 'a {
    record.get(key).and_then(|value| value.as_array()).into_iter().flatten().enumerate()
}

/// Returns a string field or a placeholder with entity position.
fn describe(entry: &Value, position: usize) -> String {
    entry.get("id").and_then(|id| id.as_str()).map_or_else(|| format!("#{position}"), |id| id.to_string())
}
