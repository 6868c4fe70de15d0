use crate::types::CampaignStatus;
use thiserror::Error;
use uuid::Uuid;

pub type DialerResult<T> = Result<T, DialerError>;

#[derive(Error, Debug)]
pub enum DialerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("DID pool is empty")]
    EmptyPool,

    #[error("Invalid dial policy: {0}")]
    InvalidPolicy(String),

    #[error("Illegal campaign transition: {from:?} -> {to:?}")]
    IllegalTransition {
        from: CampaignStatus,
        to: CampaignStatus,
    },

    #[error("Campaign not found: {0}")]
    CampaignNotFound(Uuid),

    #[error("Queue entry not found: {0}")]
    EntryNotFound(Uuid),

    #[error("Disposition already exists: {0}")]
    DuplicateDisposition(String),

    #[error("Disposition not found: {0}")]
    DispositionNotFound(String),

    #[error("Unknown follow-up action: {0}")]
    InvalidAction(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
