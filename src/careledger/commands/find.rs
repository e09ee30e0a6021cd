use crate::commands::CmdResult;
use crate::error::{LedgerError, Result};
use crate::model::Record;
use crate::store::{Backing, RecordStore};

use super::helpers::ensure_loaded;

pub fn run<R: Record, B: Backing>(
    store: &mut RecordStore<R, B>,
    key: &str,
) -> Result<CmdResult<R>> {
    let mut result = CmdResult::default();
    result.extend_messages(ensure_loaded(store)?);

    let found = store
        .find(key)
        .cloned()
        .ok_or_else(|| LedgerError::not_found(R::KIND, key))?;
    Ok(result.with_listed(vec![found]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Facility, InventoryItem};
    use crate::store::memory::MemBacking;

    #[test]
    fn finds_by_key_ignoring_case() {
        let mut store: RecordStore<InventoryItem, _> =
            RecordStore::new(MemBacking::with_content("ABC1,Gauze,10,2025-01-01,Supply\n"));
        let result = run(&mut store, "abc1").unwrap();
        assert_eq!(result.listed[0].item_id, "ABC1");
    }

    #[test]
    fn missing_key_is_not_found() {
        let mut store: RecordStore<Facility, _> =
            RecordStore::new(MemBacking::with_content("City Clinic,1 Main St,555\n"));
        let err = run(&mut store, "Town Clinic").unwrap_err();
        assert_eq!(err.to_string(), "Facility 'Town Clinic' not found.");
    }
}
