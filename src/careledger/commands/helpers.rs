use crate::commands::CmdMessage;
use crate::error::Result;
use crate::model::Record;
use crate::store::{Backing, LoadReport, RecordStore, SkipReason};

/// Turns a load report into user-facing messages. Rows skipped for a wrong
/// field count stay silent; rows with unparseable values get a warning.
pub fn load_messages<R: Record>(report: &LoadReport) -> Vec<CmdMessage> {
    let mut messages = Vec::new();
    if report.missing {
        messages.push(CmdMessage::info(format!(
            "{} file not found. Add {} to get started.",
            R::KIND,
            R::PLURAL
        )));
    }
    for skipped in report.invalid_lines() {
        if let SkipReason::InvalidField(reason) = &skipped.reason {
            messages.push(CmdMessage::warning(format!(
                "Skipped line {}: {}",
                skipped.line, reason
            )));
        }
    }
    messages
}

/// Loads the store if it has not been loaded yet, returning any messages.
pub fn ensure_loaded<R: Record, B: Backing>(
    store: &mut RecordStore<R, B>,
) -> Result<Vec<CmdMessage>> {
    Ok(store
        .ensure_loaded()?
        .map(|report| load_messages::<R>(&report))
        .unwrap_or_default())
}

/// Reports a key collision that the store itself does not prevent.
pub fn duplicate_warning<R: Record, B: Backing>(
    store: &RecordStore<R, B>,
    key: &str,
    skip: Option<&str>,
) -> Option<CmdMessage> {
    let clash = store
        .records()
        .iter()
        .filter(|r| skip.map_or(true, |s| !r.key_matches(s)))
        .any(|r| r.key_matches(key));
    clash.then(|| {
        CmdMessage::warning(format!(
            "{} '{}' already exists; lookups will return the first match.",
            R::KIND,
            key
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::{Facility, InventoryItem};
    use crate::store::{memory::MemBacking, SkippedLine};

    #[test]
    fn missing_file_is_informational() {
        let report = LoadReport {
            missing: true,
            ..Default::default()
        };
        let messages = load_messages::<Facility>(&report);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].level, MessageLevel::Info);
    }

    #[test]
    fn field_count_skips_stay_silent() {
        let report = LoadReport {
            loaded: 1,
            skipped: vec![SkippedLine {
                line: 2,
                reason: SkipReason::FieldCount {
                    expected: 5,
                    found: 4,
                },
            }],
            missing: false,
        };
        assert!(load_messages::<InventoryItem>(&report).is_empty());
    }

    #[test]
    fn invalid_fields_warn() {
        let report = LoadReport {
            loaded: 0,
            skipped: vec![SkippedLine {
                line: 3,
                reason: SkipReason::InvalidField("bad quantity".into()),
            }],
            missing: false,
        };
        let messages = load_messages::<InventoryItem>(&report);
        assert_eq!(messages[0].level, MessageLevel::Warning);
        assert!(messages[0].content.contains("line 3"));
    }

    #[test]
    fn duplicate_warning_ignores_renamed_record() {
        let mut store: RecordStore<Facility, MemBacking> =
            RecordStore::new(MemBacking::with_content("Alpha,A,1\nBeta,B,2\n"));
        store.load().unwrap();

        assert!(duplicate_warning(&store, "ALPHA", None).is_some());
        assert!(duplicate_warning(&store, "alpha", Some("Alpha")).is_none());
        assert!(duplicate_warning(&store, "beta", Some("Alpha")).is_some());
        assert!(duplicate_warning(&store, "Gamma", None).is_none());
    }
}
