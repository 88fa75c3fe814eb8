//! Shared library for the reading-list dashboard.
//!
//! This crate provides common functionality used across the workspace:
//! - Configuration management
//! - Data models for list entries and enriched records
//! - Logging infrastructure

pub mod config;
pub mod logging;
pub mod models;

// Re-export commonly used types
pub use config::{Config, JoinPolicy};
pub use logging::LogConfig;
pub use models::*;

/// Common result type using anyhow::Error
pub type Result<T> = anyhow::Result<T>;
