// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Ledger node: the verification ledger behind a durable event log.
//!
//! # Commit protocol
//! ```text
//! submission
//! ↓
//! 1. prepare (shadow apply; decode, oracle, replay guard, edge policy)
//! ↓
//! 2. append every event of the call as one log entry (fsync)
//! ↓
//! 3. commit to the in-memory ledger
//! ```
//! A failure in step 1 or 2 leaves the ledger untouched. A crash between 2
//! and 3 is recovered by replay, since the log is the source of truth.

use crate::config::NodeConfig;
use crate::errors::Result;
use crate::events::event_log::{EventLogHeader, HEADER_LEN};
use crate::events::{recover_from_event_log, EventLogWriter, LogPosition};
use crate::submission::Submission;
use crate::telemetry;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use transition_kernel::{
    Address, ExecutionCommitment, LedgerConfig, LedgerError, PreparedCommit, ProgramId, ProofOracle,
    VerificationLedger,
};

pub struct LedgerNode<O> {
    ledger: VerificationLedger<O>,
    log: Option<EventLogWriter>,
}

impl<O: ProofOracle> LedgerNode<O> {
    /// Ledger without durability.
    pub fn in_memory(oracle: O, config: &NodeConfig) -> Self {
        Self {
            ledger: VerificationLedger::new(oracle, config.to_ledger_config()),
            log: None,
        }
    }

    /// Opens the node described by `config`, recovering from its event log
    /// when one exists.
    pub fn open(oracle: O, config: &NodeConfig) -> Result<Self> {
        match &config.event_log_path {
            Some(path) => Self::open_with_log(oracle, config.to_ledger_config(), path),
            None => Ok(Self::in_memory(oracle, config)),
        }
    }

    fn open_with_log(oracle: O, config: LedgerConfig, path: &Path) -> Result<Self> {
        let existing = path.exists() && !is_torn_create(path, &config.program_id)?;

        if !existing {
            if path.exists() {
                std::fs::remove_file(path)?;
            }
            let writer = EventLogWriter::create(path, config.program_id)?;
            info!(path = %path.display(), program = %config.program_id, "Created event log");
            return Ok(Self {
                ledger: VerificationLedger::new(oracle, config),
                log: Some(writer),
            });
        }

        let (ledger, position) = recover_from_event_log(path, oracle, config)?;
        let LogPosition {
            entry_count,
            valid_len,
            ..
        } = position;
        let writer = EventLogWriter::resume(path, entry_count, valid_len)?;
        info!(
            path = %path.display(),
            entries = entry_count,
            height = ledger.height().0,
            "Recovered ledger from event log"
        );

        Ok(Self {
            ledger,
            log: Some(writer),
        })
    }

    pub fn verify(&mut self, submitter: Address, seal: &[u8], journal: &[u8]) -> Result<ExecutionCommitment> {
        let prepared = self
            .ledger
            .prepare(submitter, seal, journal)
            .map_err(|e| reject(submitter, 1, e))?;

        // prepare stages exactly one transition
        let commitment = prepared.transitions()[0].commitment;
        self.persist_and_commit(prepared)?;
        Ok(commitment)
    }

    pub fn batch_verify<S, J>(&mut self, submitter: Address, seals: &[S], journals: &[J]) -> Result<Vec<ExecutionCommitment>>
    where
        S: AsRef<[u8]>,
        J: AsRef<[u8]>,
    {
        let prepared = self
            .ledger
            .prepare_batch(submitter, seals, journals)
            .map_err(|e| reject(submitter, seals.len(), e))?;

        let commitments = prepared.commitments();
        self.persist_and_commit(prepared)?;
        Ok(commitments)
    }

    /// Verifies a bundle exported by the prover. The bundle must target this
    /// ledger's program.
    pub fn submit(&mut self, submitter: Address, submission: &Submission) -> Result<ExecutionCommitment> {
        if submission.program_id != self.ledger.config().program_id {
            warn!(
                %submitter,
                bundle = %submission.program_id,
                "Submission targets a different program"
            );
            return Err(reject(submitter, 1, LedgerError::ProofRejected));
        }
        self.verify(submitter, &submission.seal, &submission.journal)
    }

    fn persist_and_commit(&mut self, prepared: PreparedCommit) -> Result<()> {
        if prepared.is_empty() {
            return Ok(());
        }

        let start = Instant::now();
        let events = prepared.events();
        if let Some(log) = self.log.as_mut() {
            if let Err(e) = log.append(&events) {
                error!(error = %e, path = %log.path().display(), "Failed to persist ledger events");
                return Err(e.into());
            }
        }

        let accepted = prepared.len();
        self.ledger.commit(prepared)?;

        for event in &events {
            debug!(event = event.name(), commitment = %event.commitment_id(), "Ledger event");
        }
        let height = self.ledger.height().0;
        metrics::counter!(telemetry::SUBMISSIONS_ACCEPTED, accepted as u64);
        metrics::counter!(telemetry::EVENTS_COMMITTED, events.len() as u64);
        metrics::histogram!(telemetry::COMMIT_DURATION, start.elapsed().as_secs_f64());
        metrics::gauge!(telemetry::LEDGER_HEIGHT, height as f64);

        info!(accepted, height, "Committed submission");
        Ok(())
    }

    pub fn ledger(&self) -> &VerificationLedger<O> {
        &self.ledger
    }

    pub fn is_durable(&self) -> bool {
        self.log.is_some()
    }

    /// Entries in the durable log, zero when running in memory.
    pub fn log_entries(&self) -> u64 {
        self.log.as_ref().map_or(0, EventLogWriter::entry_count)
    }
}

/// True for an empty file, or one holding only the start of the header this
/// program would write: a crash during `EventLogWriter::create`.
fn is_torn_create(path: &Path, program_id: &ProgramId) -> Result<bool> {
    if std::fs::metadata(path)?.len() >= HEADER_LEN as u64 {
        return Ok(false);
    }

    let bytes = std::fs::read(path)?;
    let mut expected = Vec::with_capacity(HEADER_LEN);
    EventLogHeader::new(*program_id).write_to(&mut expected)?;
    if !expected.starts_with(&bytes) {
        return Ok(false);
    }

    if !bytes.is_empty() {
        warn!(path = %path.display(), len = bytes.len(), "Discarding event log with incomplete header");
    }
    Ok(true)
}

fn reject(submitter: Address, items: usize, err: LedgerError) -> crate::errors::NodeError {
    let reason = telemetry::rejection_reason(&err);
    warn!(%submitter, items, reason, error = %err, "Submission rejected");
    metrics::counter!(telemetry::SUBMISSIONS_REJECTED, 1, "reason" => reason);
    err.into()
}
