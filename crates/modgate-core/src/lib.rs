//! Modgate Core
//!
//! Core types, traits, and utilities shared across modgate components.
//!
//! This crate provides:
//! - The four-way content disposition (`ContentStatus`) and the risk-level
//!   scale it is derived from
//! - The stored content item and its review metadata
//! - Error types and result handling

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{ContentItem, ContentStatus, RiskLevel};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{ContentItem, ContentStatus, RiskLevel};
}
