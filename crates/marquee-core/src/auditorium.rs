//! Auditorium reference data.

use serde::{Deserialize, Serialize};

use crate::ids::AuditoriumId;

/// A screening room.
///
/// Auditoriums carry no capacity of their own; each showtime fixes its own
/// seat total at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auditorium {
    /// Operator-chosen ID, e.g. `AUD1`.
    pub id: AuditoriumId,

    /// Display name.
    pub name: String,
}
