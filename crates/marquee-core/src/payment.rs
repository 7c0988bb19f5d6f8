//! Payment method recording.
//!
//! Payment is recorded with a booking but never validated financially. The
//! only check performed is the card-number format, and the number itself is
//! discarded once the format passes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// How a booking was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Paid in cash at the counter.
    Cash,
    /// Paid by card; the number passed the format check and was discarded.
    Card,
}

impl PaymentMethod {
    /// Accept a card payment after checking the number format
    /// `XXXX-XXXX-XXXX-XXXX` (four dash-separated groups of four digits).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when the number does not match the
    /// format. The error never echoes the number back.
    pub fn card(number: &str) -> Result<Self> {
        let number = number.trim();
        let mut groups = 0;
        for group in number.split('-') {
            if group.len() != 4 || !group.bytes().all(|b| b.is_ascii_digit()) {
                groups = 0;
                break;
            }
            groups += 1;
        }
        if groups == 4 {
            Ok(Self::Card)
        } else {
            Err(Error::InvalidInput {
                field: "card_number",
                reason: "expected XXXX-XXXX-XXXX-XXXX".into(),
            })
        }
    }

    /// Label used when logging the payment.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Card => "Card",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
