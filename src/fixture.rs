//! Fixture Builder: paired (host, device) test data
//!
//! Every builder returns a reference [`HostArray`] together with a
//! device-backed container holding the same values, so a test can exercise
//! device-side operations and check the result against the host side with
//! [`crate::diff`].
//!
//! The range and slice builders embed the random data inside a 4x oversized
//! ones-filled backing container and return a *view*, not a copy, so they
//! exercise write-into-view followed by read-back-through-view, validating
//! stride and offset handling rather than just dense storage.

use crate::container::{HostScalar, Matrix, Order, Scalar, StridedRange, Vector};
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::host::HostArray;
use crate::runtime::{Context, Runtime};
use rand::Rng;

/// Structured triangular matrix forms
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MatrixForm {
    /// Zero strictly below the diagonal
    Upper,
    /// Zero strictly above the diagonal
    Lower,
    /// Upper with the diagonal forced to exactly one
    UnitUpper,
    /// Lower with the diagonal forced to exactly one
    UnitLower,
}

fn random_values(n: usize) -> Vec<f64> {
    let mut rng = rand::rng();
    (0..n).map(|_| rng.random::<f64>()).collect()
}

fn check_positive(arg: &'static str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(Error::invalid_argument(arg, "must be positive"));
    }
    Ok(())
}

/// Random host-resident scalar in [0, 1)
pub fn host_scalar(dtype: DType) -> HostScalar {
    HostScalar::new(rand::rng().random::<f64>(), dtype)
}

/// Random device-resident scalar in [0, 1)
pub fn device_scalar<R: Runtime>(dtype: DType, ctx: &Context<R>) -> Scalar<R> {
    Scalar::new(rand::rng().random::<f64>(), dtype, ctx)
}

/// Random vector pair: uniform [0, 1) values cast to `dtype`
pub fn vector<R: Runtime>(
    size: usize,
    dtype: DType,
    ctx: &Context<R>,
) -> Result<(HostArray, Vector<R>)> {
    check_positive("size", size)?;
    let host = HostArray::from_f64(&random_values(size), &[size], Order::RowMajor, dtype)?;
    let dev = Vector::from_host(&host, ctx)?;
    Ok((host, dev))
}

/// Vector pair where the device side is a contiguous range view
///
/// The random vector is written into `[size, 2*size)` of a ones-filled
/// backing vector of length `4*size`; the returned view spans that same
/// range and must reflect the embedded values exactly.
pub fn vector_range<R: Runtime>(
    size: usize,
    dtype: DType,
    ctx: &Context<R>,
) -> Result<(HostArray, Vector<R>)> {
    let (host, dev) = vector(size, dtype, ctx)?;

    let big = Vector::ones(size * 4, dtype, ctx);
    let view = big.range(size..2 * size)?;
    view.assign(&dev)?;

    Ok((host, view))
}

/// Vector pair where the device side is a stride-2 slice view
///
/// The view selects every second element of `[size, 3*size)` in the 4x
/// backing vector, so its length is exactly `size`.
pub fn vector_slice<R: Runtime>(
    size: usize,
    dtype: DType,
    ctx: &Context<R>,
) -> Result<(HostArray, Vector<R>)> {
    let (host, dev) = vector(size, dtype, ctx)?;

    let big = Vector::ones(size * 4, dtype, ctx);
    let view = big.slice(StridedRange::new(size, size * 4 - size, 2))?;
    view.assign(&dev)?;

    Ok((host, view))
}

/// Random upper-triangular host matrix: zero strictly below the diagonal
pub fn host_upper_matrix(
    rows: usize,
    cols: usize,
    order: Order,
    dtype: DType,
) -> Result<HostArray> {
    let mut values = random_values(rows * cols);
    for i in 0..rows {
        for j in 0..cols.min(i) {
            values[i * cols + j] = 0.0;
        }
    }
    HostArray::from_f64(&values, &[rows, cols], order, dtype)
}

/// Upper-triangular host matrix with the diagonal forced to exactly one
pub fn host_unit_upper_matrix(
    rows: usize,
    cols: usize,
    order: Order,
    dtype: DType,
) -> Result<HostArray> {
    let upper = host_upper_matrix(rows, cols, order, dtype)?;
    let mut values = upper.to_f64_vec();
    for i in 0..rows.min(cols) {
        values[i * cols + i] = 1.0;
    }
    HostArray::from_f64(&values, &[rows, cols], order, dtype)
}

/// Random lower-triangular host matrix, derived by transposing an upper
/// form built with swapped dimensions
pub fn host_lower_matrix(
    rows: usize,
    cols: usize,
    order: Order,
    dtype: DType,
) -> Result<HostArray> {
    Ok(host_upper_matrix(cols, rows, order, dtype)?.transposed())
}

/// Lower-triangular host matrix with unit diagonal
pub fn host_unit_lower_matrix(
    rows: usize,
    cols: usize,
    order: Order,
    dtype: DType,
) -> Result<HostArray> {
    Ok(host_unit_upper_matrix(cols, rows, order, dtype)?.transposed())
}

fn host_matrix(
    rows: usize,
    cols: usize,
    order: Order,
    dtype: DType,
    form: Option<MatrixForm>,
) -> Result<HostArray> {
    match form {
        None => HostArray::from_f64(&random_values(rows * cols), &[rows, cols], order, dtype),
        Some(MatrixForm::Upper) => host_upper_matrix(rows, cols, order, dtype),
        Some(MatrixForm::Lower) => host_lower_matrix(rows, cols, order, dtype),
        Some(MatrixForm::UnitUpper) => host_unit_upper_matrix(rows, cols, order, dtype),
        Some(MatrixForm::UnitLower) => host_unit_lower_matrix(rows, cols, order, dtype),
    }
}

/// Random matrix pair in the requested order, optionally triangular
pub fn matrix<R: Runtime>(
    rows: usize,
    cols: usize,
    order: Order,
    dtype: DType,
    form: Option<MatrixForm>,
    ctx: &Context<R>,
) -> Result<(HostArray, Matrix<R>)> {
    check_positive("rows", rows)?;
    check_positive("cols", cols)?;
    let host = host_matrix(rows, cols, order, dtype, form)?;
    let dev = Matrix::from_host(&host, order, ctx)?;
    Ok((host, dev))
}

/// Matrix pair where the device side is a contiguous 2-D block view
///
/// The matrix is embedded at offset `(rows, cols)` inside a ones-filled
/// `4*rows x 4*cols` backing matrix.
pub fn matrix_range<R: Runtime>(
    rows: usize,
    cols: usize,
    order: Order,
    dtype: DType,
    form: Option<MatrixForm>,
    ctx: &Context<R>,
) -> Result<(HostArray, Matrix<R>)> {
    let (host, dev) = matrix(rows, cols, order, dtype, form, ctx)?;

    let big = Matrix::ones(rows * 4, cols * 4, dtype, order, ctx);
    let view = big.range(rows..2 * rows, cols..2 * cols)?;
    view.assign(&dev)?;

    Ok((host, view))
}

/// Matrix pair where the device side is a strided 2-D slice view
///
/// Rows are selected with step 2 over `[rows, 3*rows)` and columns with
/// step 3 over `[cols, 4*cols)`, giving a view of exactly `rows x cols`.
pub fn matrix_slice<R: Runtime>(
    rows: usize,
    cols: usize,
    order: Order,
    dtype: DType,
    form: Option<MatrixForm>,
    ctx: &Context<R>,
) -> Result<(HostArray, Matrix<R>)> {
    let (host, dev) = matrix(rows, cols, order, dtype, form, ctx)?;

    let big = Matrix::ones(rows * 4, cols * 4, dtype, order, ctx);
    let view = big.slice(
        StridedRange::new(rows, rows * 4 - rows, 2),
        StridedRange::new(cols, cols * 4, 3),
    )?;
    view.assign(&dev)?;

    Ok((host, view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::cpu::CpuRuntime;

    fn ctx() -> Context<CpuRuntime> {
        Context::default()
    }

    #[test]
    fn test_vector_zero_size_rejected() {
        let ctx = ctx();
        assert!(vector::<CpuRuntime>(0, DType::F64, &ctx).is_err());
    }

    #[test]
    fn test_scalars_in_unit_interval() {
        let ctx = ctx();
        for _ in 0..16 {
            let h = host_scalar(DType::F64);
            assert!((0.0..1.0).contains(&h.value()));
            let d = device_scalar::<CpuRuntime>(DType::F64, &ctx);
            assert!((0.0..1.0).contains(&d.value()));
        }
    }

    #[test]
    fn test_upper_matrix_zero_below_diagonal() {
        let a = host_upper_matrix(4, 3, Order::RowMajor, DType::F64).unwrap();
        for i in 0..4 {
            for j in 0..3 {
                if j < i {
                    assert_eq!(a.get(&[i, j]), Some(0.0));
                }
            }
        }
    }

    #[test]
    fn test_slice_view_lengths() {
        let ctx = ctx();
        let (host, view) = vector_slice::<CpuRuntime>(5, DType::F64, &ctx).unwrap();
        assert_eq!(view.len(), host.len());

        let (host, view) =
            matrix_slice::<CpuRuntime>(3, 4, Order::RowMajor, DType::F64, None, &ctx).unwrap();
        assert_eq!(view.shape(), host.shape());
    }
}
