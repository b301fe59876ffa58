//! colexpr - vectorized scalar-expression kernels
//!
//! Evaluates SQL scalar operators over typed column vectors. Each vector
//! carries a null bitmap, a mask bitmap and an optional selection; kernels
//! propagate all three and compute only the selected rows.
//!
//! ```
//! use colexpr::{binary_eval, ColumnVector, Operator, ScalarType};
//!
//! let (out, ty) = binary_eval(
//!     Operator::Plus,
//!     ScalarType::Int,
//!     ScalarType::Int,
//!     &ColumnVector::int(vec![1, 2, 3]),
//!     &ColumnVector::int(vec![10, 20, 30]),
//! )?;
//! assert_eq!(ty, ScalarType::Int);
//! assert_eq!(out.typed::<i64>()?, &[11, 22, 33]);
//! # Ok::<(), colexpr::EvalError>(())
//! ```

pub mod cast;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod kernels;
mod logging;
pub mod registry;
pub mod types;
pub mod vector;

pub use cast::{cast, promote};
pub use config::EvalConfig;
pub use dispatch::{binary_eval, multi_eval, unary_eval, Evaluator};
pub use error::{EvalError, Result};
pub use kernels::pattern::{Matcher, PatternCache};
pub use registry::{Operator, Registry, UNBOUNDED};
pub use types::{type_name, ScalarType, Value};
pub use vector::{ColumnValues, ColumnVector, SelectionVector};
