//! Device-backed containers: vectors, matrices, scalars, and their views
//!
//! Containers pair reference-counted device [`Storage`] with a [`Layout`]
//! describing shape, strides, and offset. Range and slice views are new
//! containers over the same storage with adjusted layout metadata; they own
//! no memory of their own.

mod layout;
mod matrix;
mod scalar;
mod storage;
mod vector;

pub use layout::{Layout, Order, Shape, StridedRange, Strides};
pub use matrix::Matrix;
pub use scalar::{HostScalar, Scalar};
pub use storage::Storage;
pub use vector::Vector;

use crate::runtime::Runtime;

/// Read a (possibly strided) container into a dense row-major host buffer
///
/// Contiguous full-buffer containers are read back directly; views are
/// gathered into a contiguous scratch buffer on the device first.
pub(crate) fn gather_bytes<R: Runtime>(storage: &Storage<R>, layout: &Layout) -> Vec<u8> {
    let esize = storage.dtype().size_in_bytes();

    if layout.is_contiguous() && layout.elem_count() == storage.len() {
        return storage.to_bytes();
    }

    let numel = layout.elem_count();
    let size_bytes = numel * esize;
    let device = storage.device();

    let scratch = R::allocate(size_bytes, device);
    R::copy_strided(
        storage.ptr(),
        layout.offset() * esize,
        scratch,
        layout.shape(),
        layout.strides(),
        esize,
        device,
    );

    let mut bytes = vec![0u8; size_bytes];
    R::copy_from_device(scratch, &mut bytes, device);
    R::deallocate(scratch, size_bytes, device);
    bytes
}

/// Scatter a dense row-major host buffer into a (possibly strided) container
pub(crate) fn scatter_bytes<R: Runtime>(bytes: &[u8], storage: &Storage<R>, layout: &Layout) {
    let esize = storage.dtype().size_in_bytes();
    debug_assert_eq!(bytes.len(), layout.elem_count() * esize);

    R::write_strided(
        bytes,
        storage.ptr(),
        layout.offset() * esize,
        layout.shape(),
        layout.strides(),
        esize,
        storage.device(),
    );
}
