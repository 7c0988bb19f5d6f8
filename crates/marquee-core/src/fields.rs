//! Field hygiene for the delimited persistence format.
//!
//! Operation input is trimmed and checked here before it is allowed into a
//! record; a value carrying the field separator would corrupt the row it is
//! written into. Malformed input always fails fast with
//! [`Error::InvalidInput`]; only rows already in storage get the tolerant
//! treatment, and that happens at load time in the store crate.

use crate::error::{Error, Result};
use crate::FIELD_SEPARATOR;

/// Whether a value can be embedded in a row without splitting it.
#[must_use]
pub fn is_clean(value: &str) -> bool {
    !value.contains(FIELD_SEPARATOR) && !value.contains('\n') && !value.contains('\r')
}

/// Trim and validate a required field: non-blank and separator-free.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] naming the offending field.
pub fn required(field: &'static str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::InvalidInput {
            field,
            reason: "must not be blank".into(),
        });
    }
    clean(field, value)
}

/// Trim and validate an optional field: may be blank, must be separator-free.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] naming the offending field.
pub fn optional(field: &'static str, value: &str) -> Result<String> {
    clean(field, value.trim())
}

fn clean(field: &'static str, value: &str) -> Result<String> {
    if is_clean(value) {
        Ok(value.to_owned())
    } else {
        Err(Error::InvalidInput {
            field,
            reason: "must not contain a field or line separator".into(),
        })
    }
}
