use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Record;
use crate::store::{Backing, RecordStore};

use super::helpers::load_messages;

pub fn run<R: Record, B: Backing>(store: &mut RecordStore<R, B>) -> Result<CmdResult<R>> {
    let mut result = CmdResult::default();
    if let Some(report) = store.load_if_empty()? {
        result.extend_messages(load_messages::<R>(&report));
    }

    if store.records().is_empty() {
        result.add_message(CmdMessage::info(format!("No {} available.", R::PLURAL)));
    }

    Ok(result.with_listed(store.records().to_vec()))
}
