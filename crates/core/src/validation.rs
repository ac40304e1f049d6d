//! Input contract for the write path.
//!
//! Presence and format checks run before any row is read or written, so a
//! rejected request never touches the database.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Decimal places a stored amount can carry (`NUMERIC(12,2)`).
const AMOUNT_MAX_SCALE: u32 = 2;

/// Amounts must stay strictly below this (10 integer digits).
const AMOUNT_LIMIT: i64 = 10_000_000_000;

/// Validation errors for incoming fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Field absent or blank.
    #[error("{field} is required")]
    Missing {
        /// Client-facing field name.
        field: &'static str,
    },

    /// Field does not parse as a decimal number.
    #[error("{field} must be a valid number")]
    NotANumber {
        /// Client-facing field name.
        field: &'static str,
    },

    /// Field parsed but is below zero.
    #[error("{field} must not be negative")]
    Negative {
        /// Client-facing field name.
        field: &'static str,
    },

    /// Field has more decimal places than an amount can store.
    #[error("{field} must have at most 2 decimal places")]
    TooPrecise {
        /// Client-facing field name.
        field: &'static str,
    },

    /// Field is too large for an amount column.
    #[error("{field} must be less than 10000000000")]
    OutOfRange {
        /// Client-facing field name.
        field: &'static str,
    },

    /// Field is not a `YYYY-MM-DD` calendar date.
    #[error("{field} must be a date in YYYY-MM-DD format")]
    InvalidDate {
        /// Client-facing field name.
        field: &'static str,
    },

    /// Field is not a whole number.
    #[error("{field} must be a whole number")]
    InvalidInteger {
        /// Client-facing field name.
        field: &'static str,
    },
}

/// Returns the trimmed value of a required text field.
///
/// # Errors
///
/// Returns `ValidationError::Missing` if the value is absent or blank.
pub fn require_text<'a>(
    value: Option<&'a str>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::Missing { field }),
    }
}

/// Returns a required field exactly as given.
///
/// Used for secrets, where surrounding whitespace is significant.
///
/// # Errors
///
/// Returns `ValidationError::Missing` if the value is absent or empty.
pub fn require_present<'a>(
    value: Option<&'a str>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::Missing { field }),
    }
}

/// Normalizes an optional text field: blank becomes `None`.
#[must_use]
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

/// Parses a monetary amount: a non-negative decimal number.
///
/// Accepts plain (`"15000.50"`) and scientific (`"1.5e4"`) notation. The
/// value never passes through binary floating point.
///
/// # Errors
///
/// Returns `Missing` for a blank value, `NotANumber` if it does not parse,
/// `Negative` if it is below zero, `TooPrecise` past two decimal places and
/// `OutOfRange` at ten integer digits or more.
pub fn parse_amount(raw: &str, field: &'static str) -> Result<Decimal, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Missing { field });
    }

    let amount = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| ValidationError::NotANumber { field })?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ValidationError::Negative { field });
    }

    let amount = amount.normalize();
    if amount.scale() > AMOUNT_MAX_SCALE {
        return Err(ValidationError::TooPrecise { field });
    }
    if amount >= Decimal::from(AMOUNT_LIMIT) {
        return Err(ValidationError::OutOfRange { field });
    }

    Ok(amount)
}

/// Parses a calendar date in `YYYY-MM-DD` form.
///
/// # Errors
///
/// Returns `Missing` for a blank value and `InvalidDate` otherwise.
pub fn parse_date(raw: &str, field: &'static str) -> Result<NaiveDate, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Missing { field });
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate { field })
}

/// Parses a whole number such as a service code or record number.
///
/// # Errors
///
/// Returns `Missing` for a blank value and `InvalidInteger` otherwise.
pub fn parse_integer<T: FromStr>(raw: &str, field: &'static str) -> Result<T, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Missing { field });
    }

    raw.parse()
        .map_err(|_| ValidationError::InvalidInteger { field })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("20000", dec!(20000))]
    #[case("15000.50", dec!(15000.5))]
    #[case(" 0 ", dec!(0))]
    #[case("1.5e4", dec!(15000))]
    #[case("-0", dec!(0))]
    #[case("0.10", dec!(0.1))]
    #[case("9999999999.99", dec!(9999999999.99))]
    fn test_parse_amount_accepts(#[case] raw: &str, #[case] expected: Decimal) {
        assert_eq!(parse_amount(raw, "amountPaid"), Ok(expected));
    }

    #[rstest]
    #[case("", ValidationError::Missing { field: "amountPaid" })]
    #[case("abc", ValidationError::NotANumber { field: "amountPaid" })]
    #[case("12,000", ValidationError::NotANumber { field: "amountPaid" })]
    #[case("-5", ValidationError::Negative { field: "amountPaid" })]
    #[case("0.005", ValidationError::TooPrecise { field: "amountPaid" })]
    #[case("10.999", ValidationError::TooPrecise { field: "amountPaid" })]
    #[case("123456789012345", ValidationError::OutOfRange { field: "amountPaid" })]
    #[case("10000000000", ValidationError::OutOfRange { field: "amountPaid" })]
    fn test_parse_amount_rejects(#[case] raw: &str, #[case] expected: ValidationError) {
        assert_eq!(parse_amount(raw, "amountPaid"), Err(expected));
    }

    #[test]
    fn test_parse_amount_keeps_decimal_precision() {
        let a = parse_amount("0.1", "servicePrice").unwrap();
        let b = parse_amount("0.2", "servicePrice").unwrap();
        assert_eq!(a + b, dec!(0.3));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-03-01", "date"),
            Ok(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );
        assert_eq!(
            parse_date("01/03/2024", "date"),
            Err(ValidationError::InvalidDate { field: "date" })
        );
        assert_eq!(
            parse_date("2024-02-30", "date"),
            Err(ValidationError::InvalidDate { field: "date" })
        );
        assert_eq!(
            parse_date("  ", "date"),
            Err(ValidationError::Missing { field: "date" })
        );
    }

    #[test]
    fn test_require_text() {
        assert_eq!(require_text(Some(" RAA111A "), "plateNumber"), Ok("RAA111A"));
        assert_eq!(
            require_text(Some(""), "plateNumber"),
            Err(ValidationError::Missing {
                field: "plateNumber"
            })
        );
        assert_eq!(
            require_text(None, "plateNumber"),
            Err(ValidationError::Missing {
                field: "plateNumber"
            })
        );
    }

    #[test]
    fn test_require_present_keeps_whitespace() {
        assert_eq!(require_present(Some("Abcdef1 "), "password"), Ok("Abcdef1 "));
        assert_eq!(require_present(Some("  "), "password"), Ok("  "));
        assert_eq!(
            require_present(Some(""), "password"),
            Err(ValidationError::Missing { field: "password" })
        );
        assert_eq!(
            require_present(None, "password"),
            Err(ValidationError::Missing { field: "password" })
        );
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(Some(" Toyota ")), Some("Toyota".to_string()));
        assert_eq!(optional_text(Some("   ")), None);
        assert_eq!(optional_text(None), None);
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer::<i32>("12", "serviceCode"), Ok(12));
        assert_eq!(
            parse_integer::<i32>("12.5", "serviceCode"),
            Err(ValidationError::InvalidInteger {
                field: "serviceCode"
            })
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::Missing {
                field: "plateNumber"
            }
            .to_string(),
            "plateNumber is required"
        );
        assert_eq!(
            ValidationError::Negative {
                field: "servicePrice"
            }
            .to_string(),
            "servicePrice must not be negative"
        );
    }
}
