//! Scalar containers: host-resident and device-resident

use super::Storage;
use crate::dtype::{self, DType};
use crate::runtime::{Context, Runtime};

/// Host-resident scalar tagged with an element precision
///
/// The stored value is rounded to what `dtype` can represent, so a
/// host/device scalar pair built from the same input compares exactly.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HostScalar {
    value: f64,
    dtype: DType,
}

impl HostScalar {
    /// Create a host scalar from a native float
    pub fn new(value: f64, dtype: DType) -> Self {
        Self {
            value: dtype::round_to_dtype(value, dtype),
            dtype,
        }
    }

    /// The scalar value
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Element precision tag
    #[inline]
    pub fn dtype(&self) -> DType {
        self.dtype
    }
}

/// Device-resident scalar (a one-element device allocation)
pub struct Scalar<R: Runtime> {
    storage: Storage<R>,
}

impl<R: Runtime> Scalar<R> {
    /// Create a device scalar from a native float
    pub fn new(value: f64, dtype: DType, ctx: &Context<R>) -> Self {
        let bytes = dtype::f64s_to_bytes(&[value], dtype);
        Self {
            storage: Storage::from_bytes(&bytes, dtype, ctx.device()),
        }
    }

    /// Read the scalar value back to the host
    pub fn value(&self) -> f64 {
        dtype::read_f64(&self.storage.to_bytes(), self.dtype(), 0)
    }

    /// Element precision tag
    #[inline]
    pub fn dtype(&self) -> DType {
        self.storage.dtype()
    }
}

impl<R: Runtime> std::fmt::Debug for Scalar<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scalar")
            .field("dtype", &self.dtype())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::cpu::CpuRuntime;

    #[test]
    fn test_host_scalar_rounds_to_dtype() {
        let s = HostScalar::new(0.1, DType::F32);
        assert_eq!(s.value(), 0.1f32 as f64);
        let d = HostScalar::new(0.1, DType::F64);
        assert_eq!(d.value(), 0.1);
    }

    #[test]
    fn test_device_scalar_roundtrip() {
        let ctx = Context::<CpuRuntime>::default();
        let s = Scalar::new(0.75, DType::F32, &ctx);
        assert_eq!(s.value(), 0.75);
        assert_eq!(s.dtype(), DType::F32);
    }
}
