use super::Grid;

/// Specifies how a vehicle starts its shift.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(i32)]
pub enum StartMode {
    /// A vehicle can start whenever it is optimal.
    #[default]
    Free = 1,
    /// A vehicle must start exactly at its time window start.
    AtWindowStart = 2,
}

/// Per-vehicle attributes flattened into arrays indexed by vehicle index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VehicleAttributes {
    /// Capacity per unit, `-1` means unlimited.
    pub capacities: Grid<f64>,
    /// Overload multiplier per unit.
    pub overload_multiplier: Grid<f64>,
    /// Cost per time unit.
    pub cost_time_multiplier: Vec<f64>,
    /// Cost per distance unit.
    pub cost_distance_multiplier: Vec<f64>,
    /// Fixed cost of using the vehicle.
    pub fixed_cost: Vec<f64>,
    /// Shift start.
    pub tw_start: Vec<f64>,
    /// Shift end, `-1` means unbounded.
    pub tw_end: Vec<f64>,
    /// Allowed lateness past shift end.
    pub tw_margin: Vec<f64>,
    /// Max travelled distance, `-1` means unbounded.
    pub max_distance: Vec<f64>,
    /// Max shift duration, `-1` means unbounded.
    pub max_duration: Vec<f64>,
    /// Start point in the raw matrix.
    pub start_index: Vec<i32>,
    /// End point in the raw matrix.
    pub end_index: Vec<i32>,
    /// Travel matrix group used by the vehicle.
    pub matrix_index: Vec<usize>,
    /// Shift start mode.
    pub start_mode: Vec<StartMode>,
    /// Whether `force_end` shift preference was requested. Kept as is, not acted upon.
    pub force_end: Vec<bool>,
    /// Whether travel from the start point is free.
    pub free_approach: Vec<bool>,
    /// Whether travel to the end point is free.
    pub free_return: Vec<bool>,
    /// Chain predecessor of the vehicle, `-1` if none.
    pub previous_vehicle: Vec<i32>,
    /// Group max capacity.
    pub max_capacity: f64,
}

impl VehicleAttributes {
    /// Returns amount of vehicles.
    pub fn num_vehicle(&self) -> usize {
        self.tw_start.len()
    }

    /// Returns chain length (amount of hops to reach `-1`) for given vehicle or `None` when
    /// predecessors form a cycle.
    pub fn chain_length(&self, vehicle: usize) -> Option<usize> {
        let mut current = vehicle;
        for hops in 0..=self.previous_vehicle.len() {
            match self.previous_vehicle.get(current).copied() {
                Some(previous) if previous >= 0 => current = previous as usize,
                Some(_) => return Some(hops),
                None => return None,
            }
        }

        None
    }
}
