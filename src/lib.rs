//! # numval
//!
//! **Test fixtures and cross-representation numerical comparison for
//! device-backed vectors and matrices.**
//!
//! numval builds paired test data (a reference host array and a
//! device-backed container holding the same values) and computes
//! worst-case discrepancy metrics between the two, so a correctness suite
//! can exercise device-side linear algebra and validate results against the
//! host reference.
//!
//! ## Components
//!
//! - **Fixture Builder** ([`fixture`]): random scalars, vectors, and
//!   matrices (dense, triangular, unit-triangular) in both representations,
//!   plus range and slice *views* embedded in oversized backing containers
//!   to exercise stride and offset handling.
//! - **Numeric Comparator** ([`diff`]): normalizes any mix of host arrays,
//!   device containers, and scalars to a common representation and returns
//!   the maximum absolute elementwise difference (arrays) or relative error
//!   (scalars). Layout-invariant across row-/column-major operands.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use numval::prelude::*;
//!
//! let ctx = default_context();
//! let (host_a, dev_a) = fixture::matrix(5, 5, Order::RowMajor, DType::F64, None, ctx)?;
//! // ... exercise the library under test against dev_a ...
//! assert_eq!(diff(&host_a, &dev_a, ctx)?, 0.0);
//! ```
//!
//! ## Architecture
//!
//! Containers pair Arc-shared device [`container::Storage`] with a
//! [`container::Layout`] (shape/strides/offset); views are containers over
//! the same storage with adjusted layout metadata. Elementwise operations
//! are lazy [`expr::Expr`] trees forced explicitly with `eval()` or
//! materialized with [`expr::Assign`]. The [`runtime::Runtime`] trait is
//! the seam a real device backend would implement; the provided CPU backend
//! stands in for it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod container;
pub mod diff;
pub mod dtype;
pub mod error;
pub mod expr;
pub mod fixture;
pub mod host;
pub mod runtime;

pub use diff::diff;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::container::{HostScalar, Matrix, Order, Scalar, StridedRange, Vector};
    pub use crate::diff::{Operand, diff};
    pub use crate::dtype::DType;
    pub use crate::error::{Error, Result};
    pub use crate::expr::{Assign, Expr};
    pub use crate::fixture::{self, MatrixForm};
    pub use crate::host::HostArray;
    pub use crate::runtime::cpu::CpuRuntime;
    pub use crate::runtime::{Context, Runtime, default_context};
}

/// Default runtime for fixture construction
pub type DefaultRuntime = runtime::cpu::CpuRuntime;
