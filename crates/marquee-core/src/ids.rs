//! Identifier types for marquee entities.
//!
//! Every entity is keyed by a string identifier. Movie, showtime, and
//! booking ids are monotonic decimal sequences derived from store contents
//! by the identity allocator; auditorium ids are operator-chosen labels
//! such as `AUD1`. All of them share the same validity rule: non-blank and
//! free of the field and line separators of the persisted table format.
//!
//! The `string_id_type!` macro reduces boilerplate for these newtypes,
//! ensuring consistent implementation of parsing, display, and
//! serialization traits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::FIELD_SEPARATOR;

/// Check an identifier candidate against the shared validity rule.
fn check(s: &str) -> Result<(), IdError> {
    if s.trim().is_empty() {
        return Err(IdError::Blank);
    }
    if s.contains(FIELD_SEPARATOR) || s.contains('\n') || s.contains('\r') {
        return Err(IdError::EmbeddedSeparator);
    }
    Ok(())
}

/// Define a string-based identifier type with standard trait implementations.
///
/// Generates a newtype wrapper around `String` with implementations for:
/// - `Clone`, `PartialEq`, `Eq`, `Hash`
/// - `Serialize`, `Deserialize` (as string, validated on the way in)
/// - `FromStr`, `Display`, `Debug`
/// - `TryFrom<String>`, `Into<String>`, `AsRef<str>`
macro_rules! string_id_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create an identifier after validating the candidate string.
            ///
            /// # Errors
            ///
            /// Returns [`IdError`] when the candidate is blank or contains
            /// a field or line separator.
            pub fn new(id: impl Into<String>) -> Result<Self, IdError> {
                let id = id.into();
                check(&id)?;
                Ok(Self(id))
            }

            /// View the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id_type!(MovieId, "A movie identifier (decimal sequence).");
string_id_type!(
    AuditoriumId,
    "An auditorium identifier (operator-chosen label such as `AUD1`)."
);
string_id_type!(ShowtimeId, "A showtime identifier (decimal sequence).");
string_id_type!(BookingId, "A booking identifier (decimal sequence).");

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The identifier is empty or whitespace-only.
    #[error("identifier is blank")]
    Blank,

    /// The identifier contains the field separator or a line break.
    #[error("identifier contains a field or line separator")]
    EmbeddedSeparator,
}
