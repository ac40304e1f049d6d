//! Shared types, errors, and configuration for CRPMS.
//!
//! This crate provides common types used across all other crates:
//! - Typed identifiers for catalog entries, records, payments and users
//! - Loosely-typed request inputs (numbers that may arrive as strings)
//! - Application-wide error types
//! - Configuration management
//! - Authentication request/response payloads

pub mod auth;
pub mod config;
pub mod error;
pub mod types;

pub use auth::SessionUser;
pub use config::{AppConfig, DatabaseConfig, ServerConfig, SessionConfig};
pub use error::{AppError, AppResult};
