use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Record;
use crate::store::{Backing, RecordStore};

use super::helpers::load_messages;

/// Discards the in-memory collection and rereads the backing.
pub fn run<R: Record, B: Backing>(store: &mut RecordStore<R, B>) -> Result<CmdResult<R>> {
    let report = store.load()?;
    let mut result = CmdResult::default();
    result.extend_messages(load_messages::<R>(&report));
    if !report.missing {
        result.add_message(CmdMessage::info(format!(
            "Loaded {} {} from {}.",
            report.loaded,
            R::PLURAL,
            store.backing().describe()
        )));
    }
    Ok(result.with_listed(store.records().to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InventoryItem;
    use crate::store::memory::MemBacking;

    #[test]
    fn reload_picks_up_external_changes() {
        let mut store: RecordStore<InventoryItem, _> =
            RecordStore::new(MemBacking::with_content("I1,Gauze,10,2025-01-01,Supply\n"));
        run(&mut store).unwrap();

        store
            .backing()
            .set_content("I1,Gauze,10,2025-01-01,Supply\nI2,Mask,3,2027-01-01,PPE\n");
        let result = run(&mut store).unwrap();
        assert_eq!(result.listed.len(), 2);
        assert!(result.messages[0].content.starts_with("Loaded 2 items"));
    }
}
