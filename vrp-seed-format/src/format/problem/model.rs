extern crate serde_json;

use crate::format::{ErrorKind, FormatError, MultiFormatError};
use serde::{Deserialize, Serialize};
use std::io::{BufReader, Read};

/// A raw travel matrix group addressed by point index: `time[from * size + to]`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Matrix {
    /// Travel times.
    pub time: Vec<f64>,
    /// Travel distances.
    pub distance: Vec<f64>,
}

/// A time window with optional allowed lateness.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    /// Window start, zero when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    /// Window end, unbounded when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
    /// Allowed lateness past window end.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_lateness: Option<f64>,
}

/// A service which should be visited by some vehicle.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Service id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Point index in raw matrix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrix_index: Option<i64>,
    /// Time windows, an empty list means any time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_windows: Option<Vec<TimeWindow>>,
    /// Service duration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Setup duration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup_duration: Option<f64>,
    /// Demand per capacity unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantities: Option<Vec<f64>>,
    /// Allowed vehicle indices.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_indices: Option<Vec<i64>>,
    /// Allowed vehicle ids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticky_vehicle_ids: Option<Vec<String>>,
    /// A late cost multiplier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub late_multiplier: Option<f64>,
    /// Amount of visits of the same service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visits_number: Option<usize>,
}

/// A vehicle capacity for one unit.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Capacity {
    /// Capacity limit.
    pub limit: f64,
    /// Cost multiplier of exceeding the limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overload_multiplier: Option<f64>,
}

/// A vehicle shift preference.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ShiftPreference {
    /// Minimize shift span.
    MinimizeSpan,
    /// Start exactly at shift start.
    ForceStart,
    /// End exactly at shift end.
    ForceEnd,
}

/// A vehicle rest which is served as a pseudo service.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Rest {
    /// Rest id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Rest time window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_window: Option<TimeWindow>,
    /// Rest duration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// A late cost multiplier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub late_multiplier: Option<f64>,
}

/// A vehicle.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    /// Vehicle id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Start point index in raw matrix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<i64>,
    /// End point index in raw matrix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_index: Option<i64>,
    /// Travel matrix group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrix_index: Option<i64>,
    /// Capacities per unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacities: Option<Vec<Capacity>>,
    /// Fixed cost.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_fixed: Option<f64>,
    /// Cost per distance unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_distance_multiplier: Option<f64>,
    /// Cost per time unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_time_multiplier: Option<f64>,
    /// Cost per late time unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_late_multiplier: Option<f64>,
    /// Shift time window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_window: Option<TimeWindow>,
    /// Max distance, zero means unbounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Max duration, zero means unbounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Shift preference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift_preference: Option<ShiftPreference>,
    /// Vehicle rests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rests: Option<Vec<Rest>>,
    /// Whether travel from start is free.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_approach: Option<bool>,
    /// Whether travel to end is free.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_return: Option<bool>,
}

/// A relation between entities. Only `vehicle_trips` relations are used.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    /// Relation type.
    #[serde(rename = "type")]
    pub type_field: String,
    /// Ordered vehicle ids.
    #[serde(default)]
    pub linked_vehicle_ids: Vec<String>,
}

/// A route which is replayed as initial solution.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Vehicle id.
    pub vehicle_id: String,
    /// Ordered service ids.
    #[serde(default)]
    pub service_ids: Vec<String>,
}

/// A routing problem.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    /// Raw travel matrix groups.
    #[serde(default)]
    pub matrices: Vec<Matrix>,
    /// Vehicles.
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
    /// Services.
    #[serde(default)]
    pub services: Vec<Service>,
    /// Relations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relations: Option<Vec<Relation>>,
    /// Routes of initial solution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routes: Option<Vec<Route>>,
}

/// A relation type which links vehicles into a multi-trip chain.
pub const VEHICLE_TRIPS_RELATION: &str = "vehicle_trips";

impl Problem {
    /// Returns relations which link vehicles into chains.
    pub fn vehicle_trips(&self) -> impl Iterator<Item = &Relation> + '_ {
        self.relations.iter().flatten().filter(|relation| relation.type_field == VEHICLE_TRIPS_RELATION)
    }
}

impl Service {
    /// Returns amount of visits, at least one.
    pub fn visits(&self) -> usize {
        self.visits_number.unwrap_or(1).max(1)
    }
}

/// Reads raw problem as json value.
pub fn deserialize_raw_problem<R: Read>(reader: BufReader<R>) -> Result<serde_json::Value, MultiFormatError> {
    serde_json::from_reader(reader).map_err(|err| {
        FormatError::new_with_details(
            "E0000",
            ErrorKind::TypeMismatch,
            "cannot deserialize problem".to_string(),
            "check input json".to_string(),
            format!("{err}"),
        )
        .into()
    })
}

/// Converts a structurally validated json value into typed problem.
pub fn deserialize_problem(value: serde_json::Value) -> Result<Problem, MultiFormatError> {
    serde_json::from_value(value).map_err(|err| {
        FormatError::new_with_details(
            "E0001",
            ErrorKind::TypeMismatch,
            "problem has a field of unexpected type".to_string(),
            "check field types against problem format".to_string(),
            format!("{err}"),
        )
        .into()
    })
}

/// Serializes problem into json value.
pub fn serialize_problem(problem: &Problem) -> Result<serde_json::Value, MultiFormatError> {
    serde_json::to_value(problem).map_err(|err| {
        FormatError::new_with_details(
            "E0001",
            ErrorKind::TypeMismatch,
            "cannot serialize problem".to_string(),
            "check problem values".to_string(),
            format!("{err}"),
        )
        .into()
    })
}
