//! Helper functionality.

mod collections;
pub use self::collections::*;
