//! Element trait for mapping Rust types to DType

use super::DType;
use bytemuck::{Pod, Zeroable};

/// Trait for types that can be elements of a container
///
/// This trait connects Rust's type system to numval's runtime dtype system.
/// It is implemented for the floating-point primitives the fixture builders
/// produce.
///
/// # Bounds
/// - `Copy + Send + Sync + 'static` - Basic trait requirements
/// - `Pod + Zeroable` - Safe memory transmutation (bytemuck)
pub trait Element: Copy + Send + Sync + Pod + Zeroable + 'static {
    /// The corresponding DType for this Rust type
    const DTYPE: DType;
}

impl Element for f64 {
    const DTYPE: DType = DType::F64;
}

impl Element for f32 {
    const DTYPE: DType = DType::F32;
}
