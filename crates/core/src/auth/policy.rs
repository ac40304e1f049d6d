//! Password acceptance rule.

use thiserror::Error;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Reasons a password is refused at registration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Shorter than [`MIN_PASSWORD_LENGTH`].
    #[error("Password must be at least {min} characters long")]
    TooShort {
        /// Required minimum length.
        min: usize,
    },

    /// Lacks an uppercase letter, a lowercase letter or a digit.
    #[error("Password must contain uppercase, lowercase, and numbers")]
    MissingCharacterClass,
}

/// Checks a candidate password: at least eight characters with one ASCII
/// uppercase letter, one lowercase letter and one digit.
///
/// # Errors
///
/// Returns the first rule the password breaks.
pub fn check_password_policy(password: &str) -> Result<(), PasswordPolicyError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PasswordPolicyError::TooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }

    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if has_upper && has_lower && has_digit {
        Ok(())
    } else {
        Err(PasswordPolicyError::MissingCharacterClass)
    }
}
