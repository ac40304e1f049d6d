//! Core business logic for CRPMS.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Row fetching happens in `crpms-db`; everything here is a synchronous
//! function over values it is handed.
//!
//! # Modules
//!
//! - `billing` - Daily report grouping and per-car invoice computation
//! - `validation` - Input contract for the write path (amounts, dates, required fields)
//! - `auth` - Password hashing and the password acceptance rule

pub mod auth;
pub mod billing;
pub mod validation;
