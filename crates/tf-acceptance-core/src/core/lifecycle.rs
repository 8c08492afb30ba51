// crates/tf-acceptance-core/src/core/lifecycle.rs
// ============================================================================
// Module: Scenario Lifecycle
// Description: State machine for one provisioning lifecycle.
// Purpose: Reject out-of-order provisioning steps.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! A scenario moves `NotStarted -> Initialized -> Applied -> Asserted ->
//! Destroyed`. `PlanOnly` is a terminal state reached from `Initialized`.
//! `Destroyed` may also follow `NotStarted`, `Initialized`, or `Applied` so a
//! failed init or apply can still be torn down.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Lifecycle position of a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    /// No provisioning step has succeeded yet.
    NotStarted,
    /// The provisioning tool was initialized.
    Initialized,
    /// The configuration was applied.
    Applied,
    /// Outputs were read and compared.
    Asserted,
    /// Provisioned resources were destroyed.
    Destroyed,
    /// A plan was produced without applying.
    PlanOnly,
}

impl LifecycleState {
    /// Returns a stable label for the state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Initialized => "initialized",
            Self::Applied => "applied",
            Self::Asserted => "asserted",
            Self::Destroyed => "destroyed",
            Self::PlanOnly => "plan_only",
        }
    }

    /// Returns true when no further transition is allowed.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Destroyed | Self::PlanOnly)
    }

    /// Returns true when `next` is a legal successor of `self`.
    #[must_use]
    pub const fn can_advance(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::NotStarted, Self::Initialized)
                | (Self::Initialized, Self::Applied)
                | (Self::Initialized, Self::PlanOnly)
                | (Self::Applied, Self::Asserted)
                | (
                    Self::NotStarted | Self::Initialized | Self::Applied | Self::Asserted,
                    Self::Destroyed
                )
        )
    }

    /// Moves to `next`.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::InvalidTransition`] when `next` is not a legal
    /// successor.
    pub const fn advance(self, next: Self) -> Result<Self, LifecycleError> {
        if self.can_advance(next) {
            Ok(next)
        } else {
            Err(LifecycleError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Lifecycle transition errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// Attempted an illegal state change.
    #[error("invalid lifecycle transition from {} to {}", .from.as_str(), .to.as_str())]
    InvalidTransition {
        /// Current state.
        from: LifecycleState,
        /// Requested state.
        to: LifecycleState,
    },
}
