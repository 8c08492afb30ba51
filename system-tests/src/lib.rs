// system-tests/src/lib.rs
// ============================================================================
// Module: tf-acceptance System Tests Library
// Description: Settings for the terraform acceptance test binaries.
// Purpose: Let every suite resolve terraform and the fixture the same way.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! The test binaries under `system-tests/tests` run a real terraform binary
//! against `system-tests/fixtures/basic`. They are built only with the
//! `system-tests` feature and skip when terraform cannot be found.

pub mod config;
