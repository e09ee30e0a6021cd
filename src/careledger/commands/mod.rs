use crate::config::LedgerConfig;
use std::path::PathBuf;

pub mod add;
pub mod config;
pub mod delete;
pub mod find;
pub mod helpers;
pub mod list;
pub mod load;
pub mod update;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// Structured outcome of a command. `R` is the record kind it touched.
#[derive(Debug)]
pub struct CmdResult<R = ()> {
    pub affected: Vec<R>,
    pub listed: Vec<R>,
    pub config: Option<LedgerConfig>,
    pub messages: Vec<CmdMessage>,
}

impl<R> Default for CmdResult<R> {
    fn default() -> Self {
        Self {
            affected: Vec::new(),
            listed: Vec::new(),
            config: None,
            messages: Vec::new(),
        }
    }
}

impl<R> CmdResult<R> {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn extend_messages(&mut self, messages: impl IntoIterator<Item = CmdMessage>) {
        self.messages.extend(messages);
    }

    pub fn with_affected(mut self, records: Vec<R>) -> Self {
        self.affected = records;
        self
    }

    pub fn with_listed(mut self, records: Vec<R>) -> Self {
        self.listed = records;
        self
    }

    pub fn with_config(mut self, config: LedgerConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_level(&self, level: MessageLevel) -> bool {
        self.messages.iter().any(|m| m.level == level)
    }
}

/// Where the ledger lives on disk.
#[derive(Debug, Clone)]
pub struct LedgerPaths {
    pub data_dir: PathBuf,
}
