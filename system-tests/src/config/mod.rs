// system-tests/src/config/mod.rs
// ============================================================================
// Module: System Test Configuration
// Description: Settings shared by the terraform system tests.
// Purpose: Expose the environment-backed configuration and its errors.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Configuration for the system-test binaries.

mod env;


pub use env::EnvError;
pub use env::SystemTestConfig;
pub use env::SystemTestEnv;
