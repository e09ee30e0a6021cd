//! # Storage Layer
//!
//! A [`RecordStore`] pairs an ordered, in-memory collection of one record
//! kind with a [`Backing`] that holds the persisted rows.
//!
//! ## Implementations
//!
//! - [`fs::FileBacking`]: production storage, one plain text file per kind
//!   - `facilities.txt`: `name,address,phone`
//!   - `inventory.txt`: `itemID,name,quantity,expirationDate,type`
//!
//! - [`memory::MemBacking`]: in-memory rows for testing
//!   - No persistence
//!   - Can simulate write failures
//!
//! ## Persistence
//!
//! Every mutation rewrites the whole backing from the in-memory collection,
//! so a fresh load always reflects exactly what the store holds. A store is
//! loaded before its first mutation; otherwise the rewrite would drop rows
//! that were only on disk. If the write fails, the in-memory change is rolled
//! back.
//!
//! ## Loading
//!
//! Rows with the wrong field count are skipped. Rows whose fields fail to
//! parse (a non-numeric quantity) are skipped too and reported in the
//! [`LoadReport`], rather than aborting the whole load. Bytes that are not
//! valid UTF-8 are decoded lossily.
//!
//! A load that fails part way leaves the store unloaded, so the next
//! mutation retries the load instead of rewriting the backing from a partial
//! collection.

use crate::codec::{encode_row, split_row};
use crate::error::{LedgerError, Result};
use crate::model::{Facility, InventoryItem, Record};
use std::borrow::Cow;
use std::io::BufRead;

pub mod backing;
pub mod fs;
pub mod memory;

pub use backing::Backing;

pub type FacilityStore<B> = RecordStore<Facility, B>;
pub type InventoryStore<B> = RecordStore<InventoryItem, B>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The row did not split into the expected number of fields.
    FieldCount { expected: usize, found: usize },
    /// The row had the right shape but a field failed to parse.
    InvalidField(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the backing.
    pub line: usize,
    pub reason: SkipReason,
}

/// Outcome of a [`RecordStore::load`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedLine>,
    /// True when there was no backing file yet.
    pub missing: bool,
}

impl LoadReport {
    /// Skipped rows that had the right shape but unparseable values.
    pub fn invalid_lines(&self) -> impl Iterator<Item = &SkippedLine> {
        self.skipped
            .iter()
            .filter(|s| matches!(s.reason, SkipReason::InvalidField(_)))
    }
}

pub struct RecordStore<R: Record, B: Backing> {
    records: Vec<R>,
    backing: B,
    loaded: bool,
}

impl<R: Record, B: Backing> RecordStore<R, B> {
    pub fn new(backing: B) -> Self {
        Self {
            records: Vec::new(),
            backing,
            loaded: false,
        }
    }

    pub fn backing(&self) -> &B {
        &self.backing
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Replaces the in-memory collection with the persisted rows.
    ///
    /// On an I/O error mid-read the rows read so far are kept and the error
    /// is returned. The store only counts as loaded once every row was read.
    pub fn load(&mut self) -> Result<LoadReport> {
        self.records.clear();
        self.loaded = false;

        let mut report = LoadReport::default();
        let mut reader = match self.backing.open_rows()? {
            Some(reader) => reader,
            None => {
                tracing::debug!(
                    kind = R::KIND,
                    backing = %self.backing.describe(),
                    "no backing file yet"
                );
                report.missing = true;
                self.loaded = true;
                return Ok(report);
            }
        };

        let mut buf = Vec::new();
        let mut line_no = 0;
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_no += 1;

            let decoded = String::from_utf8_lossy(&buf);
            if matches!(decoded, Cow::Owned(_)) {
                tracing::warn!(kind = R::KIND, line = line_no, "row is not valid UTF-8");
            }
            let line = decoded.trim_end_matches(|c| c == '\n' || c == '\r');
            if line.trim().is_empty() {
                continue;
            }

            let fields = match split_row(line, R::FIELD_COUNT) {
                Ok(fields) => fields,
                Err(found) => {
                    tracing::debug!(
                        kind = R::KIND,
                        line = line_no,
                        found,
                        "skipping malformed row"
                    );
                    report.skipped.push(SkippedLine {
                        line: line_no,
                        reason: SkipReason::FieldCount {
                            expected: R::FIELD_COUNT,
                            found,
                        },
                    });
                    continue;
                }
            };

            match R::from_fields(&fields) {
                Ok(record) => self.records.push(record),
                Err(e) => {
                    tracing::warn!(kind = R::KIND, line = line_no, "skipping row: {}", e);
                    report.skipped.push(SkippedLine {
                        line: line_no,
                        reason: SkipReason::InvalidField(e.to_string()),
                    });
                }
            }
        }

        report.loaded = self.records.len();
        self.loaded = true;
        tracing::debug!(
            kind = R::KIND,
            loaded = report.loaded,
            skipped = report.skipped.len(),
            "loaded records"
        );
        Ok(report)
    }

    /// Loads once per store lifetime. Returns the report if a load happened.
    pub fn ensure_loaded(&mut self) -> Result<Option<LoadReport>> {
        if self.loaded {
            return Ok(None);
        }
        self.load().map(Some)
    }

    /// Loads when the collection is empty, the way listing behaves. A
    /// collection left partial by a failed load is reloaded too.
    pub fn load_if_empty(&mut self) -> Result<Option<LoadReport>> {
        if self.loaded && !self.records.is_empty() {
            return Ok(None);
        }
        self.load().map(Some)
    }

    /// First record whose key matches case-insensitively.
    pub fn find(&self, key: &str) -> Option<&R> {
        self.records.iter().find(|r| r.key_matches(key))
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.records.iter().position(|r| r.key_matches(key))
    }

    pub fn add(&mut self, record: R) -> Result<&R> {
        self.ensure_loaded()?;
        self.records.push(record);

        if let Err(e) = self.persist() {
            self.records.pop();
            return Err(e);
        }

        let idx = self.records.len() - 1;
        tracing::info!(kind = R::KIND, key = self.records[idx].key(), "added record");
        Ok(&self.records[idx])
    }

    /// Patches the first record matching `key`. The key itself may change;
    /// no uniqueness check is made here.
    pub fn update(&mut self, key: &str, patch: R::Patch) -> Result<&R> {
        self.ensure_loaded()?;
        let idx = self
            .position(key)
            .ok_or_else(|| LedgerError::not_found(R::KIND, key))?;

        let previous = self.records[idx].clone();
        self.records[idx].apply(patch);

        if let Err(e) = self.persist() {
            self.records[idx] = previous;
            return Err(e);
        }

        tracing::info!(kind = R::KIND, key, "updated record");
        Ok(&self.records[idx])
    }

    pub fn delete(&mut self, key: &str) -> Result<R> {
        self.ensure_loaded()?;
        let idx = self
            .position(key)
            .ok_or_else(|| LedgerError::not_found(R::KIND, key))?;

        let removed = self.records.remove(idx);
        if let Err(e) = self.persist() {
            self.records.insert(idx, removed);
            return Err(e);
        }

        tracing::info!(kind = R::KIND, key, "deleted record");
        Ok(removed)
    }

    /// Rewrites the whole backing from the in-memory collection.
    pub fn persist(&self) -> Result<()> {
        let rows: Vec<String> = self
            .records
            .iter()
            .map(|r| encode_row(&r.to_fields()))
            .collect();
        self.backing.write_rows(&rows)
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemBacking;
    use super::*;
    use crate::model::{FacilityPatch, ItemPatch, PLACEHOLDER};

    fn inventory(content: &str) -> InventoryStore<MemBacking> {
        RecordStore::new(MemBacking::with_content(content))
    }

    #[test]
    fn missing_backing_loads_empty() {
        let mut store: FacilityStore<MemBacking> = RecordStore::new(MemBacking::new());
        assert!(!store.is_loaded());
        let report = store.load().unwrap();
        assert!(report.missing);
        assert!(store.is_loaded());
        assert!(store.records().is_empty());
    }

    #[test]
    fn loading_twice_is_idempotent() {
        let mut store = inventory("I1,Gauze,10,2025-01-01,Supply\nI2,Syringe,5,2026-01-01,Tool\n");
        store.load().unwrap();
        let first = store.records().to_vec();
        store.load().unwrap();
        assert_eq!(store.records(), first.as_slice());
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn skips_row_with_wrong_field_count() {
        let mut store = inventory(
            "I1,Gauze,10,2025-01-01,Supply\nI2,Syringe,5,2026-01-01\nI3,Mask,7,2027-01-01,PPE\n",
        );
        let report = store.load().unwrap();

        assert_eq!(store.records().len(), 2);
        assert_eq!(report.loaded, 2);
        assert_eq!(
            report.skipped,
            vec![SkippedLine {
                line: 2,
                reason: SkipReason::FieldCount {
                    expected: 5,
                    found: 4
                }
            }]
        );
        assert_eq!(report.invalid_lines().count(), 0);
    }

    #[test]
    fn skips_row_with_bad_quantity() {
        let mut store = inventory("I1,Gauze,ten,2025-01-01,Supply\nI2,Syringe,5,2026-01-01,Tool\n");
        let report = store.load().unwrap();

        assert_eq!(store.records().len(), 1);
        assert_eq!(store.records()[0].item_id, "I2");
        assert_eq!(report.invalid_lines().count(), 1);
    }

    #[test]
    fn blank_lines_are_ignored() {
        let mut store = inventory("\nI1,Gauze,10,2025-01-01,Supply\n\n");
        let report = store.load().unwrap();
        assert_eq!(report.loaded, 1);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn find_is_case_insensitive() {
        let mut store = inventory("ABC1,Gauze,10,2025-01-01,Supply\n");
        store.load().unwrap();
        assert_eq!(store.find("abc1").unwrap().item_id, "ABC1");
        assert!(store.find("abc2").is_none());
    }

    #[test]
    fn find_returns_first_duplicate() {
        let mut store = inventory("I1,First,1,,A\ni1,Second,2,,B\n");
        store.load().unwrap();
        assert_eq!(store.find("I1").unwrap().name, "First");
    }

    #[test]
    fn add_keeps_rows_that_were_only_on_disk() {
        let mut store = inventory("I1,Gauze,10,2025-01-01,Supply\n");
        store
            .add(InventoryItem::new("I2", "Mask", 3, "2027-01-01", "PPE"))
            .unwrap();

        assert_eq!(
            store.backing().content().unwrap(),
            "I1,Gauze,10,2025-01-01,Supply\nI2,Mask,3,2027-01-01,PPE\n"
        );
    }

    #[test]
    fn update_scenario_reloads_with_new_values() {
        let mut store = inventory("I1,Gauze,10,2025-01-01,Supply");
        store
            .update(
                "i1",
                ItemPatch {
                    item_id: Some("I1".into()),
                    quantity: Some(5),
                    expiration_date: Some("2025-06-01".into()),
                    item_type: Some("Supply".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        store.load().unwrap();
        let item = store.find("I1").unwrap();
        assert_eq!(item.quantity, 5);
        assert_eq!(item.expiration_date, "2025-06-01");
        assert_eq!(item.name, "Gauze");
    }

    #[test]
    fn update_missing_key_writes_nothing() {
        let mut store = inventory("I1,Gauze,10,2025-01-01,Supply");
        let err = store.update("I9", ItemPatch::default()).unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(
            store.backing().content().unwrap(),
            "I1,Gauze,10,2025-01-01,Supply"
        );
    }

    #[test]
    fn update_may_rename_key() {
        let mut store: FacilityStore<MemBacking> =
            RecordStore::new(MemBacking::with_content("Old,Addr,1\n"));
        store
            .update(
                "old",
                FacilityPatch {
                    name: Some("New".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert!(store.find("old").is_none());
        assert_eq!(store.backing().content().unwrap(), "New,Addr,1\n");
    }

    #[test]
    fn delete_then_find_reports_missing() {
        let mut store = inventory("I1,Gauze,10,2025-01-01,Supply\nI2,Mask,3,2027-01-01,PPE\n");
        let removed = store.delete("I1").unwrap();

        assert_eq!(removed.item_id, "I1");
        assert!(store.find("I1").is_none());
        assert_eq!(
            store.backing().content().unwrap(),
            "I2,Mask,3,2027-01-01,PPE\n"
        );
    }

    #[test]
    fn delete_missing_key_is_not_found() {
        let mut store = inventory("I1,Gauze,10,2025-01-01,Supply\n");
        assert!(store.delete("nope").unwrap_err().is_not_found());
        assert_eq!(store.records().len(), 1);
    }

    #[test]
    fn failed_write_rolls_back_memory() {
        let mut store = inventory("I1,Gauze,10,2025-01-01,Supply\n");
        store.load().unwrap();
        store.backing().set_simulate_write_error(true);

        assert!(store
            .add(InventoryItem::new("I2", "Mask", 3, "", "PPE"))
            .is_err());
        assert!(store.delete("I1").is_err());
        assert!(store
            .update(
                "I1",
                ItemPatch {
                    quantity: Some(0),
                    ..Default::default()
                }
            )
            .is_err());

        assert_eq!(store.records().len(), 1);
        assert_eq!(store.records()[0].quantity, 10);
    }

    #[test]
    fn round_trip_loses_only_contact_fields() {
        let mut store: InventoryStore<MemBacking> = RecordStore::new(MemBacking::new());
        let mut item = InventoryItem::new("I1", "Gauze", 10, "2025-01-01", "Supply");
        item.address = "12 Main St".into();
        item.phone = "555-0100".into();
        store.add(item.clone()).unwrap();

        store.load().unwrap();
        let reloaded = store.find("I1").unwrap();
        assert_eq!(reloaded.to_fields(), item.to_fields());
        assert_eq!(reloaded.address, PLACEHOLDER);
        assert_eq!(reloaded.phone, PLACEHOLDER);
    }

    #[test]
    fn read_error_keeps_rows_read_so_far() {
        let mut store = inventory(
            "I1,Gauze,10,2025-01-01,Supply\nI2,Syringe,5,2026-01-01,Tool\nI3,Mask,7,2027-01-01,PPE\n",
        );
        store.backing().set_read_error_after(Some(2));

        assert!(matches!(store.load(), Err(LedgerError::Io(_))));
        let keys: Vec<&str> = store.records().iter().map(|r| r.key()).collect();
        assert_eq!(keys, vec!["I1", "I2"]);
        assert!(!store.is_loaded());
    }

    #[test]
    fn mutation_after_failed_load_keeps_unread_rows() {
        let original =
            "I1,Gauze,10,2025-01-01,Supply\nI2,Syringe,5,2026-01-01,Tool\nI3,Mask,7,2027-01-01,PPE\n";
        let mut store = inventory(original);
        store.backing().set_read_error_after(Some(1));
        assert!(store.load().is_err());

        // Still unreadable: the add must not rewrite the file from a partial view.
        assert!(store
            .add(InventoryItem::new("I4", "Gloves", 9, "", "PPE"))
            .is_err());
        assert_eq!(store.backing().content().unwrap(), original);

        store.backing().set_read_error_after(None);
        store
            .add(InventoryItem::new("I4", "Gloves", 9, "", "PPE"))
            .unwrap();

        assert_eq!(
            store.backing().content().unwrap(),
            format!("{}I4,Gloves,9,,PPE\n", original)
        );
        assert!(store.is_loaded());
    }

    #[test]
    fn load_if_empty_retries_partial_collection() {
        let mut store = inventory("I1,Gauze,10,2025-01-01,Supply\nI2,Syringe,5,2026-01-01,Tool\n");
        store.backing().set_read_error_after(Some(1));
        assert!(store.load_if_empty().is_err());
        assert_eq!(store.records().len(), 1);

        store.backing().set_read_error_after(None);
        assert!(store.load_if_empty().unwrap().is_some());
        assert_eq!(store.records().len(), 2);
    }

    #[test]
    fn load_if_empty_keeps_populated_collection() {
        let mut store = inventory("I1,Gauze,10,2025-01-01,Supply\n");
        assert!(store.load_if_empty().unwrap().is_some());

        store.backing().set_content("");
        assert!(store.load_if_empty().unwrap().is_none());
        assert_eq!(store.records().len(), 1);
    }
}
