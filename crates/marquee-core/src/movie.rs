//! Movie catalog types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ids::MovieId;

/// A movie in the catalog.
///
/// The booking core only ever reads `id` and `status`; the remaining fields
/// are reference data shown by presentation shells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    /// Unique movie ID (decimal sequence).
    pub id: MovieId,

    /// Title shown on listings and receipts.
    pub title: String,

    /// Age rating label (free-form, may be empty).
    pub rating: String,

    /// Runtime in minutes.
    pub duration_min: u32,

    /// Spoken language (free-form, may be empty).
    pub language: String,

    /// Whether showtimes may be scheduled against this movie.
    pub status: MovieStatus,
}

impl Movie {
    /// Whether showtimes may currently be created for this movie.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == MovieStatus::Active
    }
}

/// Scheduling status of a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovieStatus {
    /// The movie may be scheduled.
    Active,
    /// The movie is retired; new showtimes are rejected.
    Inactive,
}

impl MovieStatus {
    /// The persisted label for this status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for MovieStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovieStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Self::Active),
            "Inactive" => Ok(Self::Inactive),
            other => Err(UnknownStatus(other.to_owned())),
        }
    }
}

/// A status label that is neither `Active` nor `Inactive`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown movie status: {0}")]
pub struct UnknownStatus(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_roundtrip() {
        for status in [MovieStatus::Active, MovieStatus::Inactive] {
            let parsed: MovieStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn status_rejects_other_labels() {
        assert!("active".parse::<MovieStatus>().is_err());
        assert!("".parse::<MovieStatus>().is_err());
    }

    #[test]
    fn inactive_movie_is_not_active() {
        let movie = Movie {
            id: MovieId::new("1").unwrap(),
            title: "Stalker".into(),
            rating: "PG".into(),
            duration_min: 161,
            language: "Russian".into(),
            status: MovieStatus::Inactive,
        };
        assert!(!movie.is_active());
    }
}
