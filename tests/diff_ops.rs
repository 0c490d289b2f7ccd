//! Integration tests for the numeric comparator
//!
//! Covers reflexivity, symmetry, layout invariance, host/device
//! normalization, scalar relative error, and the rejected operand
//! combinations.

mod common;

use common::{assert_close, test_dtypes};
use numval::prelude::*;

// ============================================================================
// Array comparisons
// ============================================================================

#[test]
fn test_diff_reflexive() {
    let ctx = default_context();
    for dtype in test_dtypes() {
        let (_, v) = fixture::vector(9, dtype, ctx).unwrap();
        assert_eq!(diff(&v, &v, ctx).unwrap(), 0.0);

        let (_, m) = fixture::matrix(4, 3, Order::ColMajor, dtype, None, ctx).unwrap();
        assert_eq!(diff(&m, &m, ctx).unwrap(), 0.0);

        let (_, view) = fixture::vector_slice(5, dtype, ctx).unwrap();
        assert_eq!(diff(&view, &view, ctx).unwrap(), 0.0);
    }
}

#[test]
fn test_diff_symmetric() {
    let ctx = default_context();
    let a = Vector::from_slice(&[1.0f64, 2.0, 3.0], ctx);
    let b = Vector::from_slice(&[1.5f64, 2.0, 2.0], ctx);
    let ab = diff(&a, &b, ctx).unwrap();
    let ba = diff(&b, &a, ctx).unwrap();
    assert_eq!(ab, ba);
    assert_eq!(ab, 1.0);
}

#[test]
fn test_diff_known_value() {
    let ctx = default_context();
    let a = Vector::from_slice(&[1.0f64, 2.0, 3.0], ctx);
    let b = Vector::from_slice(&[1.0f64, 2.5, 3.0], ctx);
    assert_eq!(diff(&a, &b, ctx).unwrap(), 0.5);
}

#[test]
fn test_diff_host_against_device_pair() {
    let ctx = default_context();
    for dtype in test_dtypes() {
        let (host, dev) = fixture::vector(16, dtype, ctx).unwrap();
        assert_eq!(diff(&host, &dev, ctx).unwrap(), 0.0);

        let (host, dev) = fixture::matrix(5, 7, Order::ColMajor, dtype, None, ctx).unwrap();
        assert_eq!(diff(&host, &dev, ctx).unwrap(), 0.0);
    }
}

#[test]
fn test_diff_against_view_pairs() {
    let ctx = default_context();
    let (host, view) = fixture::vector_range(6, DType::F64, ctx).unwrap();
    assert_eq!(diff(&host, &view, ctx).unwrap(), 0.0);

    let (host, view) = fixture::matrix_slice(3, 4, Order::RowMajor, DType::F64, None, ctx).unwrap();
    assert_eq!(diff(&host, &view, ctx).unwrap(), 0.0);
}

// ============================================================================
// Layout invariance
// ============================================================================

#[test]
fn test_layout_invariance_5x5_f64() {
    // End-to-end scenario: the same 5x5 double-precision values in
    // row-major and column-major storage compare as identical.
    let ctx = default_context();
    let (host, a) = fixture::matrix(5, 5, Order::RowMajor, DType::F64, None, ctx).unwrap();
    let b = Matrix::from_host(&host, Order::ColMajor, ctx).unwrap();

    assert_ne!(a.order(), b.order());
    assert_eq!(diff(&a, &b, ctx).unwrap(), 0.0);
    assert_eq!(diff(&b, &a, ctx).unwrap(), 0.0);
}

#[test]
fn test_layout_invariance_nonzero_difference() {
    // A real discrepancy must survive the order materialization unchanged
    let ctx = default_context();
    let values = [1.0, 2.0, 3.0, 4.0];
    let host = HostArray::from_f64(&values, &[2, 2], Order::RowMajor, DType::F64).unwrap();
    let bumped =
        HostArray::from_f64(&[1.0, 2.0, 3.25, 4.0], &[2, 2], Order::RowMajor, DType::F64).unwrap();

    let a = Matrix::from_host(&host, Order::RowMajor, ctx).unwrap();
    let b = Matrix::from_host(&bumped, Order::ColMajor, ctx).unwrap();
    assert_eq!(diff(&a, &b, ctx).unwrap(), 0.25);
}

#[test]
fn test_host_matrix_adopts_device_order() {
    let ctx = default_context();
    let (host, dev) = fixture::matrix(4, 4, Order::ColMajor, DType::F32, None, ctx).unwrap();
    // Host operand on either side, against a column-major device matrix
    assert_eq!(diff(&host, &dev, ctx).unwrap(), 0.0);
    assert_eq!(diff(&dev, &host, ctx).unwrap(), 0.0);
}

// ============================================================================
// Scalar comparisons
// ============================================================================

#[test]
fn test_scalar_relative_error() {
    let ctx = default_context();
    let d = diff::<CpuRuntime>(1.0, 1.1, ctx).unwrap();
    assert_close(d, 0.1 / 1.1, 1e-12, "relative error");
}

#[test]
fn test_scalar_zero_zero_is_zero() {
    let ctx = default_context();
    assert_eq!(diff::<CpuRuntime>(0.0, 0.0, ctx).unwrap(), 0.0);
}

#[test]
fn test_scalar_containers_compare() {
    let ctx = default_context();
    let h = HostScalar::new(0.25, DType::F64);
    let d = Scalar::new(0.5, DType::F64, ctx);
    let got = diff(&h, &d, ctx).unwrap();
    assert_close(got, 0.25 / 0.5, 1e-12, "host vs device scalar");
}

// ============================================================================
// Rejected combinations
// ============================================================================

#[test]
fn test_mixed_array_scalar_rejected() {
    let ctx = default_context();
    let (_, v) = fixture::vector(3, DType::F64, ctx).unwrap();
    assert!(matches!(
        diff(&v, 1.0, ctx),
        Err(Error::UnsupportedComparison { .. })
    ));
    assert!(matches!(
        diff(0.5, &v, ctx),
        Err(Error::UnsupportedComparison { .. })
    ));
}

#[test]
fn test_shape_mismatch_rejected() {
    let ctx = default_context();
    let a = Vector::from_slice(&[1.0f64, 2.0], ctx);
    let b = Vector::from_slice(&[1.0f64, 2.0, 3.0], ctx);
    assert!(matches!(
        diff(&a, &b, ctx),
        Err(Error::ShapeMismatch { .. })
    ));
}

#[test]
fn test_dtype_mismatch_rejected() {
    let ctx = default_context();
    let a = Vector::from_slice(&[1.0f64, 2.0], ctx);
    let b = Vector::from_slice(&[1.0f32, 2.0], ctx);
    assert!(matches!(
        diff(&a, &b, ctx),
        Err(Error::DTypeMismatch { .. })
    ));
}
