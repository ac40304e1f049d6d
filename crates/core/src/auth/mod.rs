//! Authentication support for the session layer.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - Password verification
//! - The password acceptance rule applied at registration

mod password;
mod policy;

pub use password::{PasswordError, hash_password, verify_password};
pub use policy::{MIN_PASSWORD_LENGTH, PasswordPolicyError, check_password_policy};
