use crate::commands::{CmdMessage, CmdResult, MessageLevel};
use crate::error::Result;
use crate::model::Record;
use crate::store::{Backing, RecordStore};

use super::helpers::{duplicate_warning, ensure_loaded};

pub fn run<R: Record, B: Backing>(
    store: &mut RecordStore<R, B>,
    record: R,
) -> Result<CmdResult<R>> {
    let mut result = CmdResult::default();
    // A missing file is expected before the first add.
    let load_messages = ensure_loaded(store)?;
    result.extend_messages(
        load_messages
            .into_iter()
            .filter(|m| m.level != MessageLevel::Info),
    );

    if let Some(warning) = duplicate_warning(store, record.key(), None) {
        result.add_message(warning);
    }

    let added = store.add(record)?.clone();
    result.add_message(CmdMessage::success(format!(
        "{} '{}' added successfully.",
        R::KIND,
        added.key()
    )));
    result.affected.push(added);
    Ok(result)
}
