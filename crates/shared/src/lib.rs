//! Shared utilities and common types for the GradeCenter backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Time sources (system clock and a controllable clock for tests)
//! - Common validation logic

pub mod clock;
pub mod validation;
