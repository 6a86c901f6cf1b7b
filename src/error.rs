// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.

use crate::types::{Address, Hash, Wei};
use thiserror::Error;

/// Fatal aborts raised by an execution adapter.
///
/// None of these is a provable outcome: an input that fails this way never
/// yields a commitment or a journal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    #[error("transaction gas limit {tx} exceeds block gas limit {block}")]
    GasLimitExceedsBlock { tx: u64, block: u64 },

    #[error("gas price {gas_price} below base fee {base_fee}")]
    FeeBelowBaseFee { gas_price: Wei, base_fee: Wei },

    #[error("nonce mismatch for {caller}: expected {expected}, found {found}")]
    NonceMismatch { caller: Address, expected: u64, found: u64 },

    #[error("{caller} cannot cover gas: needs {required}, has {available}")]
    InsufficientFundsForGas { caller: Address, required: Wei, available: Wei },

    #[error("call into {0} requires a bytecode interpreter")]
    UnsupportedBytecode(Address),

    #[error("arithmetic overflow in {0}")]
    ArithmeticOverflow(&'static str),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalError {
    #[error("journal too short: expected at least {expected} bytes, found {found}")]
    TooShort { expected: usize, found: usize },
}

/// Typed outcomes of ledger calls. Every rejection leaves the ledger unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("malformed journal: {0}")]
    MalformedJournal(#[from] JournalError),

    #[error("proof rejected by oracle")]
    ProofRejected,

    #[error("commitment {0} already verified")]
    Replay(Hash),

    #[error("batch length mismatch: {seals} seals, {journals} journals")]
    BatchLengthMismatch { seals: usize, journals: usize },

    #[error("state root collision at {pre_state_root}: recorded {recorded}, attempted {attempted}")]
    StateRootCollision {
        pre_state_root: Hash,
        recorded: Hash,
        attempted: Hash,
    },

    #[error("prepared at height {prepared_at}, ledger is at {current}")]
    StalePreparation { prepared_at: u64, current: u64 },

    #[error("corrupt ledger history: {0}")]
    CorruptHistory(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

pub type AdapterResult<T> = core::result::Result<T, AdapterError>;
pub type LedgerResult<T> = core::result::Result<T, LedgerError>;
