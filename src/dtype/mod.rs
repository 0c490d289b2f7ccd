//! Data type system for numval containers
//!
//! This module provides the `DType` enum representing the supported element
//! precisions, along with the `Element` trait connecting Rust's primitive
//! float types to the runtime dtype system.

mod element;

pub use element::Element;

use std::fmt;

/// Element precisions supported by numval containers
///
/// Fixture data is floating-point: the builders draw uniform values in
/// [0,1) and cast them to the requested precision. Using an enum (rather
/// than generics everywhere) allows runtime precision selection, so a test
/// suite can iterate over dtypes.
///
/// # Discriminant Values
///
/// The discriminant values are **stable**: F64=0, F32=1. New precisions
/// will use new values; existing values are never changed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum DType {
    /// 64-bit floating point
    F64 = 0,
    /// 32-bit floating point
    F32 = 1,
}

impl DType {
    /// Size of one element in bytes
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            Self::F64 => 8,
            Self::F32 => 4,
        }
    }

    /// Short name for display (e.g., "f32")
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::F64 => "f64",
            Self::F32 => "f32",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// Cast f64 values into a dense byte buffer of the given dtype
pub(crate) fn f64s_to_bytes(values: &[f64], dtype: DType) -> Vec<u8> {
    match dtype {
        DType::F64 => bytemuck::cast_slice::<f64, u8>(values).to_vec(),
        DType::F32 => {
            let narrowed: Vec<f32> = values.iter().map(|&v| v as f32).collect();
            bytemuck::cast_slice::<f32, u8>(&narrowed).to_vec()
        }
    }
}

/// Read element `idx` of a dense byte buffer of the given dtype as f64
///
/// Uses unaligned reads: byte buffers read back from device memory carry no
/// alignment guarantee for the element type.
pub(crate) fn read_f64(bytes: &[u8], dtype: DType, idx: usize) -> f64 {
    let size = dtype.size_in_bytes();
    let off = idx * size;
    match dtype {
        DType::F64 => bytemuck::pod_read_unaligned::<f64>(&bytes[off..off + size]),
        DType::F32 => bytemuck::pod_read_unaligned::<f32>(&bytes[off..off + size]) as f64,
    }
}

/// Decode a dense byte buffer of the given dtype into f64 values
pub(crate) fn bytes_to_f64s(bytes: &[u8], dtype: DType) -> Vec<f64> {
    let n = bytes.len() / dtype.size_in_bytes();
    (0..n).map(|i| read_f64(bytes, dtype, i)).collect()
}

/// Round an f64 to what the given dtype can represent
pub(crate) fn round_to_dtype(value: f64, dtype: DType) -> f64 {
    match dtype {
        DType::F64 => value,
        DType::F32 => value as f32 as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dtype_size() {
        assert_eq!(DType::F64.size_in_bytes(), 8);
        assert_eq!(DType::F32.size_in_bytes(), 4);
    }

    #[test]
    fn test_short_names() {
        assert_eq!(DType::F64.short_name(), "f64");
        assert_eq!(DType::F32.short_name(), "f32");
    }
}
