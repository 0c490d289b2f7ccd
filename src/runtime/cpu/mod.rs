//! CPU runtime implementation
//!
//! The CPU runtime uses standard heap allocation and stands in for the
//! device side of a (host, device) fixture pair. It exercises the same
//! storage, view, and layout paths a real device backend would, with
//! synchronous memcpy in place of queue submission.

mod client;
mod device;
mod runtime;

pub use client::CpuClient;
pub use device::CpuDevice;
pub use runtime::CpuRuntime;
