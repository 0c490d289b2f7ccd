//! CPU device identity

use crate::runtime::Device;

/// The host CPU, standing in for the device half of a fixture pair
///
/// There is exactly one CPU device per process, so identity is trivial:
/// every handle refers to the same device and compares equal.
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuDevice;

impl CpuDevice {
    /// Get a handle to the host CPU
    pub fn new() -> Self {
        Self
    }
}

impl Device for CpuDevice {
    fn id(&self) -> usize {
        0
    }

    fn name(&self) -> String {
        "cpu".to_string()
    }
}
