//! Test modules for the heavy-hitter toolkit.
//!
//! This module contains the crate-internal test suites:
//! - Property-based tests of the estimator contracts using proptest
//! - Configuration loading tests against temporary files
//! - Observer wiring tests using mockall
//! - Test fixtures and utilities

pub mod property_tests;
