//! Monetary inputs as they arrive from clients.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts stay textual until they are parsed into `rust_decimal::Decimal`,
//! so a JSON number such as `0.1` never passes through `f64`.

use std::borrow::Cow;

use serde::Deserialize;

/// A monetary amount as submitted by a client, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    /// A JSON number, kept in its textual representation.
    Number(serde_json::Number),
    /// A JSON string such as `"15000.50"`.
    Text(String),
}

impl AmountInput {
    /// Returns the raw textual form of the amount.
    #[must_use]
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Number(n) => Cow::Owned(n.to_string()),
            Self::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }
}

impl From<rust_decimal::Decimal> for AmountInput {
    fn from(value: rust_decimal::Decimal) -> Self {
        Self::Text(value.to_string())
    }
}
