use super::Grid;

/// Per-service attributes flattened into arrays indexed by a global service index.
///
/// Real service visits occupy indices `0..num_real_services`, rests follow them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ServiceAttributes {
    /// Row of the service in the augmented matrices, `-1` for rests.
    pub matrix_index: Vec<i32>,
    /// Time window starts, unused slots hold `-1`.
    pub start_tw: Grid<f64>,
    /// Time window ends, `-1` means unbounded or unused slot.
    pub end_tw: Grid<f64>,
    /// Allowed lateness per time window, zero unless late cost applies.
    pub max_lateness: Grid<f64>,
    /// Service durations.
    pub durations: Vec<f64>,
    /// Setup durations.
    pub setup_durations: Vec<f64>,
    /// Demand per capacity unit.
    pub volumes: Grid<f64>,
    /// Allowed vehicle indices, empty means any vehicle.
    pub sticky_vehicles: Vec<Vec<usize>>,
    /// Whether the entry is a vehicle rest.
    pub is_break: Vec<bool>,
    /// Capacity dimensionality.
    pub num_units: usize,
    /// Amount of real service visits.
    pub num_real_services: usize,
}

impl ServiceAttributes {
    /// Returns total amount of services, rests included.
    pub fn num_services(&self) -> usize {
        self.durations.len()
    }
}
