// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

//! transition-kernel: deterministic state-transition commitments and a
//! replay-safe verification ledger gated by an external proof oracle.
//!
//! The kernel is pure and in-memory. It performs no I/O and does no logging;
//! durability and telemetry live in the node crate.

pub mod commitment;
pub mod config;
pub mod error;
pub mod execution;
pub mod hashing;
pub mod ledger;
pub mod oracle;
pub mod pipeline;
pub mod state;
pub mod types;

pub use commitment::{compute_commitment, decode_journal, encode_journal, ExecutionCommitment, JOURNAL_LEN};
pub use config::{EdgePolicy, LedgerConfig};
pub use error::{AdapterError, CodecError, JournalError, LedgerError};
pub use execution::{
    ExecutionAdapter, ExecutionEnvironment, ExecutionInput, ExecutionOutcome, ExecutionOutput, NativeAdapter,
    Transaction,
};
pub use ledger::{LedgerEvent, PreparedCommit, VerificationLedger};
pub use oracle::{dev_seal, journal_digest, DevModeOracle, FnOracle, ProofOracle};
pub use pipeline::{execute_and_commit, simulate, Execution, ExecutionBuilder};
pub use state::{AccountState, StateStore};
pub use types::{Address, Hash, ProgramId};

#[cfg(test)]
pub mod tests;
