// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for tf-acceptance system-tests.
// Purpose: Provide terraform discovery, fixtures, and artifact utilities.
// Dependencies: system-tests, tf-acceptance-core, tf-acceptance-terraform
// ============================================================================

//! ## Overview
//! Shared helpers for tf-acceptance system-tests.
//! Invariants:
//! - Tests skip with a `skip` summary when no terraform binary is available.
//! - Every scenario runs against its own copy of the fixture module.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod artifacts;
pub mod cli;
pub mod terraform;
