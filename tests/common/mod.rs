//! Common test utilities
#![allow(dead_code)]

use numval::prelude::*;

/// Dtypes every fixture builder is exercised with
pub fn test_dtypes() -> Vec<DType> {
    vec![DType::F32, DType::F64]
}

/// Assert two f64 slices are exactly equal, with a useful message
pub fn assert_exact(a: &[f64], b: &[f64], msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        assert_eq!(x, y, "{}: element {} differs: {} vs {}", msg, i, x, y);
    }
}

/// Assert two f64 values are close within an absolute tolerance
pub fn assert_close(a: f64, b: f64, tol: f64, msg: &str) {
    assert!(
        (a - b).abs() <= tol,
        "{}: {} vs {} (diff={:.2e}, tol={:.2e})",
        msg,
        a,
        b,
        (a - b).abs(),
        tol
    );
}
