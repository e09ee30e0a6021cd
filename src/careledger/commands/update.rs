use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Record;
use crate::store::{Backing, RecordStore};

use super::helpers::{duplicate_warning, ensure_loaded};

pub fn run<R: Record, B: Backing>(
    store: &mut RecordStore<R, B>,
    key: &str,
    patch: R::Patch,
) -> Result<CmdResult<R>> {
    let mut result = CmdResult::default();
    result.extend_messages(ensure_loaded(store)?);

    // Renames are allowed even onto an existing key; say so.
    if let Some(new_key) = R::patched_key(&patch) {
        if let Some(warning) = duplicate_warning(store, new_key, Some(key)) {
            result.add_message(warning);
        }
    }

    let updated = store.update(key, patch)?.clone();
    result.add_message(CmdMessage::success(format!(
        "{} '{}' updated successfully.",
        R::KIND,
        updated.key()
    )));
    result.affected.push(updated);
    Ok(result)
}
