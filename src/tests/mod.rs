//! Test modules for Expando.
//!
//! This module contains the crate-level test suites:
//! - Configuration loading and validation
//! - Error types and reporting
//! - End-to-end compiler scenarios
//! - Shared fixtures and proptest strategies
//!
//! Component-local unit tests live next to their code; property-based tests
//! of the compiler live in `compiler/tests`.

pub mod compiler_tests;

pub use test_utils::{create_test_dir, TestFixture};
