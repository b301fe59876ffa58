//! Column vectors with null, mask and selection metadata.
//!
//! Every kernel reads and writes the rows yielded by
//! [`ColumnVector::active_rows`]: the selection when one is present,
//! otherwise the whole batch.

pub mod bitmap;
pub mod column;
pub mod interop;
pub mod selection;

pub use bitmap::SharedBitmap;
pub use column::{ColumnValues, ColumnVector, Native};
pub use selection::{ActiveRows, SelectionVector};
