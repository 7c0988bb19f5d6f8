//! Record store layer for marquee.
//!
//! This crate persists one table file per entity type. A table file is the
//! classic header-plus-rows text layout:
//!
//! ```text
//! show_id,movie_id,aud_id,date,time,remaining_seats,base_price
//! 1,3,AUD1,2025-06-01,19:30,48,12.50
//! ```
//!
//! There is no row-level update primitive: in-place updates and deletes go
//! through [`TableFile::replace_all`], which rewrites the whole table via a
//! temp file and rename. Callers must hold their store lock across the whole
//! read-modify-replace sequence; the store itself only guarantees that each
//! individual operation is well-formed.
//!
//! # Tolerant reads
//!
//! Rows that do not parse (wrong field count, unparseable typed field) are
//! skipped with a warning rather than failing the whole load. This is a
//! deliberate tolerance policy for data already on disk; operation *input*
//! is validated strictly before it ever reaches a table. A missing table
//! file is recreated with its header and reads as empty.
//!
//! # Example
//!
//! ```no_run
//! use marquee_core::Auditorium;
//! use marquee_store::{find_by_key, TableFile};
//!
//! let table: TableFile<Auditorium> = TableFile::open("data/auditoriums.csv").unwrap();
//! let auditorium = Auditorium {
//!     id: "AUD1".parse().unwrap(),
//!     name: "Main Hall".into(),
//! };
//! table.append(&auditorium).unwrap();
//!
//! let all = table.load().unwrap();
//! assert!(find_by_key(&all, "AUD1").is_some());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod ids;
pub mod table;
pub mod tables;

pub use error::{Result, StoreError};
pub use ids::next_id;
pub use table::TableFile;

/// A record shape persistable as one row of a table file.
///
/// The first field is the primary key. Implementations live in
/// [`tables`], one per entity type.
pub trait Record: Sized {
    /// Table name; also the file stem of the backing `.csv` file.
    const TABLE: &'static str;

    /// The header line written as the first line of the table file.
    const HEADER: &'static str;

    /// The primary key of this record.
    fn key(&self) -> &str;

    /// Decode a row that was split on the field separator.
    ///
    /// Returns `None` when the row is malformed; the tolerant-read policy
    /// then drops it.
    fn from_fields(fields: &[&str]) -> Option<Self>;

    /// Encode this record as its ordered field values.
    ///
    /// Values are guaranteed separator-free by the validated constructors
    /// in `marquee-core`.
    fn to_fields(&self) -> Vec<String>;
}

/// Find a record by primary key in a loaded snapshot.
#[must_use]
pub fn find_by_key<'a, R: Record>(records: &'a [R], key: &str) -> Option<&'a R> {
    records.iter().find(|r| r.key() == key)
}
