//! Booking system configuration.

use std::path::PathBuf;

/// Configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct CinemaConfig {
    /// Directory holding the table files (default: `./data`).
    pub data_dir: PathBuf,

    /// Directory for plain-text receipts; `None` disables the receipt sink.
    pub receipt_dir: Option<PathBuf>,
}

impl CinemaConfig {
    /// Load configuration from `MARQUEE_DATA_DIR` and `MARQUEE_RECEIPT_DIR`,
    /// falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var_os("MARQUEE_DATA_DIR")
                .map_or_else(|| PathBuf::from("./data"), PathBuf::from),
            receipt_dir: std::env::var_os("MARQUEE_RECEIPT_DIR").map(PathBuf::from),
        }
    }
}

impl Default for CinemaConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            receipt_dir: None,
        }
    }
}
