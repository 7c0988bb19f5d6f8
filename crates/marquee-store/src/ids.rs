//! Identity allocation.
//!
//! The next id for a store is re-derived from the persisted set on every
//! allocation; there is no separately stored counter. Gaps left by
//! deletions are therefore never reused, and an emptied store restarts at
//! id 1. Allocation must run inside the store's critical section so that a
//! concurrent writer cannot observe the same maximum.

use crate::Record;

/// Derive the next identifier for a store snapshot.
///
/// Scans every record's key, parses it as an integer (ignoring
/// unparseable keys), and returns `max + 1` as a decimal string, or `"1"`
/// for an empty or all-unparseable store.
#[must_use]
pub fn next_id<R: Record>(records: &[R]) -> String {
    let max = records
        .iter()
        .filter_map(|r| r.key().parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    (max + 1).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::Auditorium;

    fn auditorium(id: &str) -> Auditorium {
        Auditorium {
            id: id.parse().unwrap(),
            name: "hall".into(),
        }
    }

    #[test]
    fn empty_store_starts_at_one() {
        let records: Vec<Auditorium> = Vec::new();
        assert_eq!(next_id(&records), "1");
    }

    #[test]
    fn non_numeric_keys_are_ignored() {
        let records = vec![auditorium("2"), auditorium("5"), auditorium("x")];
        assert_eq!(next_id(&records), "6");
    }

    #[test]
    fn all_non_numeric_defaults_to_one() {
        let records = vec![auditorium("AUD1"), auditorium("AUD2")];
        assert_eq!(next_id(&records), "1");
    }
}
