//! Specifies the seed solution construction and the solution format written after optimization.

mod initial_reader;
pub use self::initial_reader::*;

mod writer;
pub use self::writer::*;
