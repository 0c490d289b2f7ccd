//! Runtime backends for container storage
//!
//! This module defines the `Runtime` trait abstracting over the device a
//! container's memory lives on, plus the `Context` execution-context type
//! that selects a device/queue for fixture construction.
//!
//! # Architecture
//!
//! ```text
//! Runtime (backend identity)
//! ├── Device (identifies a specific compute unit)
//! └── Client (dispatches operations, owns stream/queue)
//! ```
//!
//! Only a CPU backend is provided; it stands in for the device side so that
//! view and layout handling can be validated without real device hardware.
//! The trait seam is where a CUDA or WebGPU backend would plug in.

mod context;

pub mod cpu;

pub use context::{Context, default_context};

/// Core trait for compute backends
///
/// `Runtime` abstracts over different compute devices. It uses static
/// dispatch via generics for zero-cost abstraction.
///
/// All copies are synchronous: when a copy method returns, the data is in
/// place and may be read.
pub trait Runtime: Clone + Send + Sync + 'static {
    /// Device identifier type
    type Device: Device;

    /// Client for dispatching operations
    type Client: RuntimeClient<Self>;

    /// Human-readable name of this runtime
    fn name() -> &'static str;

    /// Allocate zero-initialized device memory
    ///
    /// Returns a device pointer (u64) that can be used for copies.
    fn allocate(size_bytes: usize, device: &Self::Device) -> u64;

    /// Deallocate device memory
    fn deallocate(ptr: u64, size_bytes: usize, device: &Self::Device);

    /// Copy data from host to device
    fn copy_to_device(src: &[u8], dst: u64, device: &Self::Device);

    /// Copy data from device to host
    fn copy_from_device(src: u64, dst: &mut [u8], device: &Self::Device);

    /// Gather strided device data into a contiguous device buffer
    ///
    /// Walks `shape` in row-major order; element `[i0, i1, ...]` is read
    /// from `src_handle + src_byte_offset + sum(ik * strides[k]) * elem_size`
    /// and written densely into `dst_handle`.
    ///
    /// # Parameters
    /// - `src_handle`: Source buffer handle
    /// - `src_byte_offset`: Byte offset into source buffer
    /// - `dst_handle`: Destination buffer handle (contiguous)
    /// - `shape`: Shape of the view
    /// - `strides`: Strides of the source view (in elements, not bytes)
    /// - `elem_size`: Size of each element in bytes
    fn copy_strided(
        src_handle: u64,
        src_byte_offset: usize,
        dst_handle: u64,
        shape: &[usize],
        strides: &[isize],
        elem_size: usize,
        device: &Self::Device,
    );

    /// Scatter contiguous host bytes into a strided device view
    ///
    /// The inverse of [`Runtime::copy_strided`]: `src` holds `shape`
    /// elements densely in row-major order, and element `[i0, i1, ...]` is
    /// written to `dst_handle + dst_byte_offset + sum(ik * strides[k]) *
    /// elem_size`. This is what writing a small array into a range or slice
    /// view of a larger backing container compiles down to.
    fn write_strided(
        src: &[u8],
        dst_handle: u64,
        dst_byte_offset: usize,
        shape: &[usize],
        strides: &[isize],
        elem_size: usize,
        device: &Self::Device,
    );

    /// Get the default device
    fn default_device() -> Self::Device;

    /// Get the default client for a device
    fn default_client(device: &Self::Device) -> Self::Client;
}

/// Trait for device identification
pub trait Device: Clone + Send + Sync + 'static {
    /// Unique identifier for this device
    fn id(&self) -> usize;

    /// Check if two devices are the same
    fn is_same(&self, other: &Self) -> bool {
        self.id() == other.id()
    }

    /// Human-readable name
    fn name(&self) -> String {
        format!("Device({})", self.id())
    }
}

/// Trait for runtime clients that handle operation dispatch
pub trait RuntimeClient<R: Runtime>: Clone + Send + Sync {
    /// Get the device this client operates on
    fn device(&self) -> &R::Device;

    /// Synchronize: wait for all pending operations to complete
    fn synchronize(&self);
}
