use crate::commands::{CmdMessage, CmdResult, LedgerPaths};
use crate::config::LedgerConfig;
use crate::error::Result;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &LedgerPaths, action: ConfigAction) -> Result<CmdResult> {
    let mut config = LedgerConfig::load(&paths.data_dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => {}
        ConfigAction::ShowKey(key) => {
            let value = config.get(&key)?;
            result.add_message(CmdMessage::info(format!("{} = {}", key, value)));
        }
        ConfigAction::Set(key, value) => {
            config.set(&key, &value)?;
            config.save(&paths.data_dir)?;
            result.add_message(CmdMessage::success(format!("{} set to {}", key, value)));
        }
    }

    Ok(result.with_config(config))
}
