//! The models module contains the numeric representation of a routing problem as it is consumed by
//! a route optimizer: positional arrays over services, vehicles and matrix nodes.

mod grid;
pub use self::grid::Grid;

mod services;
pub use self::services::ServiceAttributes;

mod vehicles;
pub use self::vehicles::{StartMode, VehicleAttributes};

mod matrices;
pub use self::matrices::MatrixAttributes;

mod data_model;
pub use self::data_model::DataModel;

/// A value which marks an unbounded limit or an empty slot.
pub const SENTINEL: i32 = -1;

/// A float counterpart of `SENTINEL`.
pub const SENTINEL_F64: f64 = -1.;

/// A max capacity used when the first vehicle declares no capacity.
pub const UNLIMITED_CAPACITY: f64 = (1 << 30) as f64;
