//! Domain layer for the GradeCenter backend.
//!
//! This crate contains:
//! - Capability markers shared by persisted records (soft delete, audit info)
//! - Domain enums (presence status, relation kind)
//! - Validated input models for creating records

pub mod models;
