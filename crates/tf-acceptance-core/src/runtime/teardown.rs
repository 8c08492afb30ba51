// crates/tf-acceptance-core/src/runtime/teardown.rs
// ============================================================================
// Module: Teardown Guard
// Description: Scoped ownership of a provisioning handle.
// Purpose: Destroy provisioned resources exactly once on every exit path.
// Dependencies: crate::interfaces
// ============================================================================

//! ## Overview
//! [`TeardownGuard`] owns a handle from the moment it is armed. Calling
//! [`TeardownGuard::release`] destroys and returns the result; if the guard
//! is dropped without release (early return or panic) it destroys from
//! `Drop` and logs the outcome, since `Drop` cannot report errors.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::interfaces::ProvisionError;
use crate::interfaces::Provisioner;
use crate::runtime::audit::LifecycleSink;
use crate::runtime::audit::LifecycleStep;
use crate::runtime::audit::record_step;

// ============================================================================
// SECTION: Guard
// ============================================================================

/// Guard that destroys a handle when released or dropped.
///
/// # Invariants
/// - `destroy` is called at most once per guard.
pub struct TeardownGuard<'a, P: Provisioner> {
    /// Provisioning client that owns the handle's resources.
    provisioner: &'a P,
    /// Handle to destroy.
    handle: P::Handle,
    /// Scenario name for lifecycle events.
    scenario: &'a str,
    /// Lifecycle sink.
    sink: &'a dyn LifecycleSink,
    /// Set once destroy has been attempted.
    released: bool,
}

impl<'a, P: Provisioner> TeardownGuard<'a, P> {
    /// Arms a guard for `handle`.
    #[must_use]
    pub fn arm(
        provisioner: &'a P,
        handle: P::Handle,
        scenario: &'a str,
        sink: &'a dyn LifecycleSink,
    ) -> Self {
        Self {
            provisioner,
            handle,
            scenario,
            sink,
            released: false,
        }
    }

    /// Returns the guarded handle.
    #[must_use]
    pub const fn handle(&self) -> &P::Handle {
        &self.handle
    }

    /// Destroys the handle and returns the destroy result.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError`] when destroy fails.
    pub fn release(mut self) -> Result<(), ProvisionError> {
        self.destroy()
    }

    /// Runs destroy once and records it.
    fn destroy(&mut self) -> Result<(), ProvisionError> {
        self.released = true;
        let provisioner = self.provisioner;
        let handle = &self.handle;
        record_step(self.sink, self.scenario, LifecycleStep::Destroy, || {
            provisioner.destroy(handle)
        })
    }
}

impl<P: Provisioner> Drop for TeardownGuard<'_, P> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        let _ = self.destroy();
    }
}
