//! Numeric Comparator: worst-case discrepancy between two values
//!
//! [`diff`] accepts any two of host array, device vector/matrix, or scalar,
//! normalizes them to a common device-resident representation, and returns a
//! single non-negative metric: the maximum absolute elementwise difference
//! for arrays, or the relative error for scalars.
//!
//! The result is layout-invariant: comparing two matrices holding the same
//! values in opposite memory orders yields exactly zero.

use crate::container::{HostScalar, Matrix, Order, Scalar, Vector};
use crate::error::{Error, Result};
use crate::expr::{Assign, Expr};
use crate::host::HostArray;
use crate::runtime::{Context, Runtime};

/// One side of a comparison
///
/// An explicit tagged variant over everything [`diff`] accepts; `From`
/// impls let call sites pass references and plain floats directly.
pub enum Operand<'a, R: Runtime> {
    /// Reference host array (rank 1 or 2)
    Host(&'a HostArray),
    /// Device vector or vector view
    Vector(&'a Vector<R>),
    /// Device matrix or matrix view
    Matrix(&'a Matrix<R>),
    /// Host-resident scalar container
    HostScalar(&'a HostScalar),
    /// Device-resident scalar container
    DeviceScalar(&'a Scalar<R>),
    /// Plain scalar value
    Value(f64),
}

impl<R: Runtime> Operand<'_, R> {
    fn kind(&self) -> &'static str {
        match self {
            Self::Host(h) if h.ndim() == 1 => "host vector",
            Self::Host(_) => "host matrix",
            Self::Vector(_) => "device vector",
            Self::Matrix(_) => "device matrix",
            Self::HostScalar(_) => "host scalar",
            Self::DeviceScalar(_) => "device scalar",
            Self::Value(_) => "scalar",
        }
    }

    fn is_array(&self) -> bool {
        matches!(self, Self::Host(_) | Self::Vector(_) | Self::Matrix(_))
    }
}

impl<'a, R: Runtime> From<&'a HostArray> for Operand<'a, R> {
    fn from(h: &'a HostArray) -> Self {
        Self::Host(h)
    }
}

impl<'a, R: Runtime> From<&'a Vector<R>> for Operand<'a, R> {
    fn from(v: &'a Vector<R>) -> Self {
        Self::Vector(v)
    }
}

impl<'a, R: Runtime> From<&'a Matrix<R>> for Operand<'a, R> {
    fn from(m: &'a Matrix<R>) -> Self {
        Self::Matrix(m)
    }
}

impl<'a, R: Runtime> From<&'a HostScalar> for Operand<'a, R> {
    fn from(s: &'a HostScalar) -> Self {
        Self::HostScalar(s)
    }
}

impl<'a, R: Runtime> From<&'a Scalar<R>> for Operand<'a, R> {
    fn from(s: &'a Scalar<R>) -> Self {
        Self::DeviceScalar(s)
    }
}

impl<R: Runtime> From<f64> for Operand<'_, R> {
    fn from(v: f64) -> Self {
        Self::Value(v)
    }
}

/// An array operand normalized to device residency
///
/// Owned, but cheap: normalizing a device operand is a zero-copy clone.
enum ArrayLike<R: Runtime> {
    Vector(Vector<R>),
    Matrix(Matrix<R>),
}

impl<R: Runtime> ArrayLike<R> {
    fn order_hint(&self) -> Option<Order> {
        match self {
            Self::Matrix(m) => Some(m.order()),
            Self::Vector(_) => None,
        }
    }
}

fn normalize<R: Runtime>(
    op: &Operand<'_, R>,
    order_hint: Option<Order>,
    ctx: &Context<R>,
) -> Result<ArrayLike<R>> {
    match op {
        Operand::Vector(v) => Ok(ArrayLike::Vector((*v).clone())),
        Operand::Matrix(m) => Ok(ArrayLike::Matrix((*m).clone())),
        Operand::Host(h) => match h.ndim() {
            1 => Ok(ArrayLike::Vector(Vector::from_host(h, ctx)?)),
            2 => Ok(ArrayLike::Matrix(Matrix::from_host(
                h,
                order_hint.unwrap_or_default(),
                ctx,
            )?)),
            ndim => Err(Error::Rank { ndim }),
        },
        _ => unreachable!("normalize is only called on array operands"),
    }
}

fn unwrap_scalar<R: Runtime>(op: &Operand<'_, R>) -> f64 {
    match op {
        Operand::HostScalar(s) => s.value(),
        Operand::DeviceScalar(s) => s.value(),
        Operand::Value(v) => *v,
        _ => unreachable!("unwrap_scalar is only called on scalar operands"),
    }
}

/// Worst-case discrepancy between two values
///
/// - Two array-like operands: both are normalized to device containers
///   (a host matrix adopts the order of a device matrix on the other side,
///   else the default order), a memory-order mismatch is resolved by
///   materializing the second operand into the first's order, and the
///   maximum absolute elementwise difference is returned. Shapes and
///   dtypes must agree.
/// - Two scalar-like operands: returns `|a - b| / max(|a|, |b|)` (relative
///   error), with `diff(0, 0)` defined as `0`.
/// - One array and one scalar: reported as
///   [`Error::UnsupportedComparison`].
pub fn diff<'a, R: Runtime>(
    a: impl Into<Operand<'a, R>>,
    b: impl Into<Operand<'a, R>>,
    ctx: &Context<R>,
) -> Result<f64> {
    let a = a.into();
    let b = b.into();

    match (a.is_array(), b.is_array()) {
        (true, true) => {
            // Normalize left first; the right side then adopts its order,
            // mirroring the sequential normalization of the two operands.
            let hint = match &b {
                Operand::Matrix(m) => Some(m.order()),
                _ => None,
            };
            let na = normalize(&a, hint, ctx)?;
            let nb = normalize(&b, na.order_hint(), ctx)?;
            diff_arrays(na, nb, ctx)
        }
        (false, false) => Ok(relative_error(unwrap_scalar(&a), unwrap_scalar(&b))),
        _ => Err(Error::UnsupportedComparison {
            lhs: a.kind(),
            rhs: b.kind(),
        }),
    }
}

fn diff_arrays<R: Runtime>(a: ArrayLike<R>, b: ArrayLike<R>, ctx: &Context<R>) -> Result<f64> {
    match (a, b) {
        (ArrayLike::Vector(a), ArrayLike::Vector(b)) => {
            Ok(Expr::sub(&a, &b).abs().eval()?.max_abs())
        }
        (ArrayLike::Matrix(a), ArrayLike::Matrix(b)) => {
            // Bring both sides into one memory order before differencing so
            // the result is layout-invariant.
            let b = if a.order() != b.order() {
                let temp = Matrix::zeros(b.rows(), b.cols(), b.dtype(), a.order(), ctx);
                Assign::new(&temp, &b).execute()?;
                temp
            } else {
                b
            };
            Ok(Expr::sub(&a, &b).abs().eval()?.max_abs())
        }
        (ArrayLike::Vector(a), ArrayLike::Matrix(b)) => Err(Error::shape_mismatch(
            a.layout().shape(),
            b.shape(),
        )),
        (ArrayLike::Matrix(a), ArrayLike::Vector(b)) => Err(Error::shape_mismatch(
            a.shape(),
            b.layout().shape(),
        )),
    }
}

fn relative_error(a: f64, b: f64) -> f64 {
    let den = a.abs().max(b.abs());
    if den == 0.0 {
        // diff(0, 0) is zero discrepancy, not NaN
        return 0.0;
    }
    (a - b).abs() / den
}
