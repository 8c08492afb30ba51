// crates/tf-acceptance-config/src/lib.rs
// ============================================================================
// Module: tf-acceptance Config Library
// Description: Suite configuration model and validation.
// Purpose: Single source of truth for tf-acceptance.toml semantics.
// Dependencies: tf-acceptance-core, tf-acceptance-terraform, serde, toml
// ============================================================================

//! ## Overview
//! `tf-acceptance-config` defines the suite file format used by the
//! `tf-acceptance` CLI. Loading is strict and fails closed: oversized,
//! non-UTF-8, or inconsistent suites are rejected before any terraform
//! command runs.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::suite_toml_example;
