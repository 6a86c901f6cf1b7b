// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::events::event_log::EventLogError;
use crate::events::event_replay::ReplayError;
use thiserror::Error;
use transition_kernel::{AdapterError, CodecError, JournalError, LedgerError};

#[derive(Error, Debug)]
pub enum NodeError {
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Execution aborted: {0}")]
    Adapter(#[from] AdapterError),

    #[error("Journal error: {0}")]
    Journal(#[from] JournalError),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Event log error: {0}")]
    EventLog(#[from] EventLogError),

    #[error("Recovery failed: {0}")]
    Replay(#[from] ReplayError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid hex in {field}: {reason}")]
    InvalidHex { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, NodeError>;
