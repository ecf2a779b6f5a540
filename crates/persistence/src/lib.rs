//! Persistence layer for GradeCenter.
//!
//! This crate contains:
//! - Database connection management and startup ([`db`])
//! - Entity definitions (database row mappings)
//! - The entity model with soft-delete query filters ([`model`])
//! - The persistence context with its save interceptor ([`context`])

pub mod config;
pub mod context;
pub mod db;
pub mod entities;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod model;

pub use context::{AcceptChanges, EntitySet, EntryState, GradeCenterContext};
pub use db::Database;
pub use error::{ContextError, DatabaseError, ModelError};
