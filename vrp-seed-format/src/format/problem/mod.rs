//! Specifies the problem format and the readers which flatten it into positional arrays.

mod model;
pub use self::model::*;

mod index_mapper;
pub use self::index_mapper::*;

mod service_reader;
pub use self::service_reader::*;

mod vehicle_reader;
pub use self::vehicle_reader::*;

mod matrix_reader;
pub use self::matrix_reader::*;
