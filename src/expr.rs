//! Lazy elementwise expressions over device containers
//!
//! Operations are constructed lazily as an expression tree and forced
//! explicitly: [`Expr::eval`] reads the leaves back from the device and
//! computes the tree into a host buffer, and [`Assign::execute`] materializes
//! an expression into a concrete container. Nothing touches device or host
//! memory until one of those two is called.
//!
//! ```ignore
//! let d = Expr::sub(&a, &b).abs().eval()?;
//! let worst = d.max_abs();
//! ```

use crate::container::{Matrix, Shape, Vector, scatter_bytes};
use crate::dtype::{self, DType};
use crate::error::{Error, Result};
use crate::runtime::Runtime;

/// A lazily constructed elementwise expression
///
/// Leaves borrow device containers; inner nodes are elementwise operations.
/// Shapes and dtypes are validated when the expression is forced.
pub enum Expr<'a, R: Runtime> {
    /// A device vector leaf
    Vector(&'a Vector<R>),
    /// A device matrix leaf
    Matrix(&'a Matrix<R>),
    /// Elementwise absolute value
    Abs(Box<Expr<'a, R>>),
    /// Elementwise subtraction
    Sub(Box<Expr<'a, R>>, Box<Expr<'a, R>>),
}

impl<'a, R: Runtime> Expr<'a, R> {
    /// Build a lazy elementwise subtraction
    pub fn sub(lhs: impl Into<Expr<'a, R>>, rhs: impl Into<Expr<'a, R>>) -> Self {
        Self::Sub(Box::new(lhs.into()), Box::new(rhs.into()))
    }

    /// Wrap this expression in an elementwise absolute value
    pub fn abs(self) -> Self {
        Self::Abs(Box::new(self))
    }

    /// Shape the expression evaluates to
    ///
    /// Fails if a subtraction's operand shapes disagree.
    pub fn shape(&self) -> Result<Shape> {
        match self {
            Self::Vector(v) => Ok(v.layout().shape().iter().copied().collect()),
            Self::Matrix(m) => Ok(m.shape().iter().copied().collect()),
            Self::Abs(inner) => inner.shape(),
            Self::Sub(lhs, rhs) => {
                let ls = lhs.shape()?;
                let rs = rhs.shape()?;
                if ls != rs {
                    return Err(Error::shape_mismatch(&ls, &rs));
                }
                Ok(ls)
            }
        }
    }

    /// Element type the expression evaluates to
    ///
    /// Fails if a subtraction's operand dtypes disagree.
    pub fn dtype(&self) -> Result<DType> {
        match self {
            Self::Vector(v) => Ok(v.dtype()),
            Self::Matrix(m) => Ok(m.dtype()),
            Self::Abs(inner) => inner.dtype(),
            Self::Sub(lhs, rhs) => {
                let ld = lhs.dtype()?;
                let rd = rhs.dtype()?;
                if ld != rd {
                    return Err(Error::dtype_mismatch(ld, rd));
                }
                Ok(ld)
            }
        }
    }

    /// Force the expression: read leaves back from the device and compute
    ///
    /// Arithmetic is carried out in f64 regardless of the leaf dtype; the
    /// result buffer records the dtype for materialization.
    pub fn eval(&self) -> Result<EvalBuffer> {
        let shape = self.shape()?;
        let dtype = self.dtype()?;
        let values = self.eval_values()?;
        Ok(EvalBuffer {
            values,
            shape,
            dtype,
        })
    }

    fn eval_values(&self) -> Result<Vec<f64>> {
        match self {
            Self::Vector(v) => Ok(v.to_f64_vec()),
            Self::Matrix(m) => Ok(m.to_f64_vec()),
            Self::Abs(inner) => {
                let mut values = inner.eval_values()?;
                for v in &mut values {
                    *v = v.abs();
                }
                Ok(values)
            }
            Self::Sub(lhs, rhs) => {
                let mut values = lhs.eval_values()?;
                let rv = rhs.eval_values()?;
                for (l, r) in values.iter_mut().zip(rv.iter()) {
                    *l -= r;
                }
                Ok(values)
            }
        }
    }
}

impl<'a, R: Runtime> From<&'a Vector<R>> for Expr<'a, R> {
    fn from(v: &'a Vector<R>) -> Self {
        Self::Vector(v)
    }
}

impl<'a, R: Runtime> From<&'a Matrix<R>> for Expr<'a, R> {
    fn from(m: &'a Matrix<R>) -> Self {
        Self::Matrix(m)
    }
}

/// The result of forcing an expression: a dense row-major host buffer
pub struct EvalBuffer {
    values: Vec<f64>,
    shape: Shape,
    dtype: DType,
}

impl EvalBuffer {
    /// Elements in row-major order
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Shape of the evaluated expression
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Element type of the evaluated expression
    #[inline]
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Worst-case absolute element value
    pub fn max_abs(&self) -> f64 {
        use rayon::prelude::*;
        self.values
            .par_iter()
            .map(|v| v.abs())
            .reduce(|| 0.0, f64::max)
    }
}

/// Materialization of an expression into a concrete container
///
/// `Assign::new(&target, expr).execute()` forces the expression and writes
/// the result through the target's layout (so the target may be a view).
pub struct Assign<'a, R: Runtime> {
    target: AssignTarget<'a, R>,
    value: Expr<'a, R>,
}

/// A container an expression can be materialized into
pub enum AssignTarget<'a, R: Runtime> {
    /// Assign into a device vector (or vector view)
    Vector(&'a Vector<R>),
    /// Assign into a device matrix (or matrix view)
    Matrix(&'a Matrix<R>),
}

impl<'a, R: Runtime> From<&'a Vector<R>> for AssignTarget<'a, R> {
    fn from(v: &'a Vector<R>) -> Self {
        Self::Vector(v)
    }
}

impl<'a, R: Runtime> From<&'a Matrix<R>> for AssignTarget<'a, R> {
    fn from(m: &'a Matrix<R>) -> Self {
        Self::Matrix(m)
    }
}

impl<'a, R: Runtime> Assign<'a, R> {
    /// Stage an assignment of `value` into `target`
    pub fn new(target: impl Into<AssignTarget<'a, R>>, value: impl Into<Expr<'a, R>>) -> Self {
        Self {
            target: target.into(),
            value: value.into(),
        }
    }

    /// Force the expression and write the result into the target
    pub fn execute(self) -> Result<()> {
        let buf = self.value.eval()?;

        let (shape, dtype, storage, layout) = match self.target {
            AssignTarget::Vector(v) => (v.layout().shape(), v.dtype(), v.storage(), v.layout()),
            AssignTarget::Matrix(m) => (m.shape(), m.dtype(), m.storage(), m.layout()),
        };

        if buf.shape() != shape {
            return Err(Error::shape_mismatch(shape, buf.shape()));
        }
        if buf.dtype() != dtype {
            return Err(Error::dtype_mismatch(dtype, buf.dtype()));
        }

        let bytes = dtype::f64s_to_bytes(buf.values(), dtype);
        scatter_bytes(&bytes, storage, layout);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Order;
    use crate::runtime::Context;
    use crate::runtime::cpu::CpuRuntime;

    fn ctx() -> Context<CpuRuntime> {
        Context::default()
    }

    #[test]
    fn test_sub_abs_eval() {
        let ctx = ctx();
        let a = Vector::from_slice(&[1.0f64, 5.0, 3.0], &ctx);
        let b = Vector::from_slice(&[2.0f64, 2.0, 3.0], &ctx);
        let d = Expr::sub(&a, &b).abs().eval().unwrap();
        assert_eq!(d.values(), &[1.0, 3.0, 0.0]);
        assert_eq!(d.max_abs(), 3.0);
    }

    #[test]
    fn test_eval_is_lazy_until_forced() {
        let ctx = ctx();
        let a = Vector::from_slice(&[1.0f64, 2.0], &ctx);
        let b = Vector::from_slice(&[1.0f64, 2.0, 3.0], &ctx);
        // Construction does not validate; forcing does
        let e = Expr::sub(&a, &b);
        assert!(e.eval().is_err());
    }

    #[test]
    fn test_assign_materializes_across_orders() {
        let ctx = ctx();
        let src = Matrix::from_host(
            &crate::host::HostArray::from_f64(
                &[1.0, 2.0, 3.0, 4.0],
                &[2, 2],
                Order::RowMajor,
                crate::dtype::DType::F64,
            )
            .unwrap(),
            Order::ColMajor,
            &ctx,
        )
        .unwrap();

        let dst = Matrix::zeros(2, 2, crate::dtype::DType::F64, Order::RowMajor, &ctx);
        Assign::new(&dst, &src).execute().unwrap();
        assert_eq!(dst.to_f64_vec(), src.to_f64_vec());
        // Physical bytes now follow the target's row-major order
        assert_eq!(dst.storage().to_vec::<f64>(), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_assign_shape_mismatch() {
        let ctx = ctx();
        let a = Vector::from_slice(&[1.0f64, 2.0], &ctx);
        let b = Vector::from_slice(&[1.0f64, 2.0, 3.0], &ctx);
        assert!(Assign::new(&a, &b).execute().is_err());
    }
}
