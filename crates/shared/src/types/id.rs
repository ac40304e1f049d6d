//! Typed identifiers for type-safe entity references.
//!
//! Every catalog entry, service record, payment and user is keyed by a
//! database-assigned integer. Wrapping them prevents passing a
//! `PaymentNumber` where a `RecordNumber` is expected.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Macro to generate typed integer ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i32);

        impl $name {
            /// Wraps a raw database key.
            #[must_use]
            pub const fn new(value: i32) -> Self {
                Self(value)
            }

            /// Returns the raw database key.
            #[must_use]
            pub const fn into_inner(self) -> i32 {
                self.0
            }
        }

        impl From<i32> for $name {
            fn from(value: i32) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }
    };
}

typed_id!(UserId, "Unique identifier for a user account.");
typed_id!(ServiceCode, "Identifier of a service catalog entry.");
typed_id!(RecordNumber, "Identifier of a service record.");
typed_id!(PaymentNumber, "Identifier of a payment transaction.");

/// An integer field as submitted by a client.
///
/// Form-driven clients send numeric fields either as JSON numbers or as
/// strings, so both are accepted and parsed later.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum IntegerInput {
    /// A JSON number.
    Number(i64),
    /// A JSON string.
    Text(String),
}

impl IntegerInput {
    /// Returns the raw textual form of the value.
    #[must_use]
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Number(n) => Cow::Owned(n.to_string()),
            Self::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }
}
