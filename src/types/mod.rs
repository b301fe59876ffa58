//! Scalar types, values and the timestamp text format.

pub mod scalar_type;
pub mod timestamp;
pub mod value;

pub use scalar_type::{type_name, ScalarType};
pub use value::Value;
