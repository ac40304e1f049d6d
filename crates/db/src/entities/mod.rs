//! `SeaORM` entity definitions.
//!
//! Column names are `snake_case`; the API layer renames to camelCase.

pub mod cars;
pub mod payments;
pub mod service_records;
pub mod services;
pub mod sessions;
pub mod users;
