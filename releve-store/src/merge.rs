//! Idempotent append into a store object: read, append, dedup, rewrite.
//!
//! Plain read-modify-write with no concurrency control; two writers racing
//! on the same object lose one contribution. Acceptable only under the
//! single-operator usage this tool assumes.

use std::collections::HashSet;

use tracing::{info, warn};

use crate::codec;
use crate::object_store::{ObjectStore, StoreError};

/// What an append actually did, so callers can tell a suppressed duplicate
/// from a failed write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeReport {
    /// The object did not exist and was created by this write.
    pub created: bool,
    /// New rows that survived dedup.
    pub appended: usize,
    /// Incoming rows dropped as exact duplicates.
    pub duplicates: usize,
    /// Rows in the object after the write.
    pub total: usize,
}

/// Append `new_rows` to the object at `bucket`/`key`.
///
/// An absent object is created from the new rows alone. Otherwise the
/// current content is read, new rows go after the existing ones, and exact
/// full-row duplicates are removed keep-first across the combined set
/// before the object is rewritten.
pub fn append_rows(
    store: &dyn ObjectStore,
    bucket: &str,
    key: &str,
    header: &[&str],
    new_rows: &[Vec<String>],
) -> Result<MergeReport, StoreError> {
    let exists = store.head(bucket, key)?;
    let existing = if exists {
        let bytes = store.get(bucket, key)?;
        let (stored_header, records) = codec::decode(&bytes)?;
        if stored_header.iter().map(String::as_str).ne(header.iter().copied()) {
            warn!(bucket, key, "stored header differs from the expected canonical header");
        }
        records
    } else {
        Vec::new()
    };

    let mut seen: HashSet<Vec<String>> = HashSet::new();
    let mut merged: Vec<Vec<String>> = Vec::with_capacity(existing.len() + new_rows.len());
    for row in existing {
        if seen.insert(row.clone()) {
            merged.push(row);
        }
    }
    let kept_existing = merged.len();
    for row in new_rows {
        if seen.insert(row.clone()) {
            merged.push(row.clone());
        }
    }

    let appended = merged.len() - kept_existing;
    let report = MergeReport {
        created: !exists,
        appended,
        duplicates: new_rows.len() - appended,
        total: merged.len(),
    };

    let bytes = codec::encode(header, &merged)?;
    store.put(bucket, key, &bytes)?;
    info!(
        bucket,
        key,
        created = report.created,
        appended = report.appended,
        duplicates = report.duplicates,
        total = report.total,
        "store object updated"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemStore;

    const HEADER: &[&str] = &["Date", "Description"];

    fn row(date: &str, description: &str) -> Vec<String> {
        vec![date.to_string(), description.to_string()]
    }

    fn stored_rows(store: &MemStore, key: &str) -> Vec<Vec<String>> {
        let bytes = store.get("bucket", key).unwrap();
        codec::decode(&bytes).unwrap().1
    }

    #[test]
    fn test_first_write_creates_the_object() {
        let store = MemStore::new();
        let rows = [row("2025-01-01", "a"), row("2025-01-02", "b")];
        let report = append_rows(&store, "bucket", "k.csv", HEADER, &rows).unwrap();
        assert_eq!(
            report,
            MergeReport {
                created: true,
                appended: 2,
                duplicates: 0,
                total: 2,
            }
        );
        assert_eq!(stored_rows(&store, "k.csv"), rows);
    }

    #[test]
    fn test_appending_the_same_rows_twice_is_idempotent() {
        let store = MemStore::new();
        let rows = [row("2025-01-01", "a"), row("2025-01-02", "b")];
        append_rows(&store, "bucket", "k.csv", HEADER, &rows).unwrap();
        let report = append_rows(&store, "bucket", "k.csv", HEADER, &rows).unwrap();
        assert_eq!(
            report,
            MergeReport {
                created: false,
                appended: 0,
                duplicates: 2,
                total: 2,
            }
        );
        assert_eq!(stored_rows(&store, "k.csv"), rows);
    }

    #[test]
    fn test_append_keeps_existing_order_then_new() {
        let store = MemStore::new();
        let a = row("2025-01-01", "a");
        let b = row("2025-01-02", "b");
        let c = row("2025-01-03", "c");
        append_rows(&store, "bucket", "k.csv", HEADER, &[a.clone(), b.clone()]).unwrap();
        let report =
            append_rows(&store, "bucket", "k.csv", HEADER, &[b.clone(), c.clone()]).unwrap();
        assert_eq!(report.appended, 1);
        assert_eq!(report.duplicates, 1);
        assert_eq!(stored_rows(&store, "k.csv"), vec![a, b, c]);
    }

    #[test]
    fn test_rows_differing_in_any_field_are_kept() {
        let store = MemStore::new();
        let rows = [row("2025-01-01", "a"), row("2025-01-01", "b")];
        let report = append_rows(&store, "bucket", "k.csv", HEADER, &rows).unwrap();
        assert_eq!(report.appended, 2);
    }

    #[test]
    fn test_duplicates_already_in_the_store_collapse() {
        let store = MemStore::new();
        let a = row("2025-01-01", "a");
        let bytes = codec::encode(HEADER, &[a.clone(), a.clone()]).unwrap();
        store.put("bucket", "k.csv", &bytes).unwrap();

        let report = append_rows(&store, "bucket", "k.csv", HEADER, &[]).unwrap();
        assert_eq!(report.total, 1);
        assert_eq!(stored_rows(&store, "k.csv"), vec![a]);
    }
}
