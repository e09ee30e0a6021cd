use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("{kind} '{key}' not found.")]
    NotFound { kind: &'static str, key: String },

    #[error("Invalid {field} '{value}': {reason}")]
    InvalidField {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Malformed record: expected {expected} fields, found {found}")]
    MalformedRecord { expected: usize, found: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl LedgerError {
    pub fn not_found(kind: &'static str, key: impl Into<String>) -> Self {
        LedgerError::NotFound {
            kind,
            key: key.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LedgerError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
