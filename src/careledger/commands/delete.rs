use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Record;
use crate::store::{Backing, RecordStore};

use super::helpers::ensure_loaded;

pub fn run<R: Record, B: Backing>(
    store: &mut RecordStore<R, B>,
    key: &str,
) -> Result<CmdResult<R>> {
    let mut result = CmdResult::default();
    result.extend_messages(ensure_loaded(store)?);

    let removed = store.delete(key)?;
    result.add_message(CmdMessage::success(format!(
        "{} '{}' deleted successfully.",
        R::KIND,
        removed.key()
    )));
    result.affected.push(removed);
    Ok(result)
}
