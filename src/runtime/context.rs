//! Execution context: device/queue selection for container construction

use super::cpu::CpuRuntime;
use super::{Runtime, RuntimeClient};
use std::sync::OnceLock;

/// Execution context for a runtime
///
/// A `Context` bundles the device a fixture's containers are allocated on
/// with the client used to dispatch operations against it. Fixture builders
/// take a context so a test suite can target a specific device/queue; most
/// callers use [`default_context`].
#[derive(Clone)]
pub struct Context<R: Runtime> {
    device: R::Device,
    client: R::Client,
}

impl<R: Runtime> Context<R> {
    /// Create a context for a specific device
    pub fn new(device: R::Device) -> Self {
        let client = R::default_client(&device);
        Self { device, client }
    }

    /// The device this context allocates on
    #[inline]
    pub fn device(&self) -> &R::Device {
        &self.device
    }

    /// The client dispatching operations for this context
    #[inline]
    pub fn client(&self) -> &R::Client {
        &self.client
    }

    /// Wait for all pending operations on this context to complete
    pub fn synchronize(&self) {
        self.client.synchronize();
    }
}

impl<R: Runtime> Default for Context<R> {
    fn default() -> Self {
        Self::new(R::default_device())
    }
}

impl<R: Runtime> std::fmt::Debug for Context<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Context<{}>", R::name())
    }
}

static DEFAULT_CONTEXT: OnceLock<Context<CpuRuntime>> = OnceLock::new();

/// Process-wide default execution context
///
/// Lazily initialized on first call and shared by every caller for the
/// lifetime of the process; it is never torn down. Read-only after
/// initialization, so it is safe to use from parallel test runners.
pub fn default_context() -> &'static Context<CpuRuntime> {
    DEFAULT_CONTEXT.get_or_init(Context::default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Device;

    #[test]
    fn test_default_context_is_singleton() {
        let a = default_context();
        let b = default_context();
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn test_context_device_matches_client() {
        let ctx = Context::<CpuRuntime>::default();
        assert!(ctx.device().is_same(ctx.client().device()));
    }
}
