// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Event Replay - Authoritative Recovery
//!
//! The event log is the only source of truth. Recovery reads it front to
//! back and rebuilds the ledger with `VerificationLedger::restore`.
//!
//! # Invariants
//! - Incomplete trailing entry (crash mid-append) -> ignored with a warning
//! - Checksum mismatch or undecodable entry before the tail -> fail closed
//! - Out-of-sequence entry -> fail closed
//! - Header or program mismatch -> fail closed
//! - Crash-symmetric: replay(log) reproduces the ledger that wrote it

use crate::events::event_log::{entry_checksum, EntryHeader, EventLogError, EventLogHeader, HEADER_LEN};
use crate::telemetry::{LEDGER_HEIGHT, REPLAY_DURATION};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Instant;
use thiserror::Error;
use transition_kernel::ledger::LedgerEvent;
use transition_kernel::{LedgerConfig, LedgerError, ProgramId, ProofOracle, VerificationLedger};

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Event log header invalid: {0}")]
    Header(#[from] EventLogError),

    #[error("Checksum mismatch in entry {seq}: expected {expected:#018x}, found {found:#018x}")]
    ChecksumMismatch { seq: u64, expected: u64, found: u64 },

    #[error("Event log corrupted at offset {offset}: {reason}")]
    Corrupted { offset: u64, reason: String },

    #[error("Entry {seq} deserialization failed: {reason}")]
    Deserialization { seq: u64, reason: String },

    #[error("Ledger rejected history: {0}")]
    Ledger(#[from] LedgerError),
}

pub type Result<T> = std::result::Result<T, ReplayError>;

/// Where the complete part of a log ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LogPosition {
    pub entry_count: u64,
    /// Header plus complete entries, in bytes.
    pub valid_len: u64,
    /// Bytes of an incomplete trailing entry that were ignored.
    pub torn_bytes: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecoveredLog {
    pub events: Vec<LedgerEvent>,
    pub position: LogPosition,
}

/// Reads and validates a whole event log.
pub fn read_event_log(path: impl AsRef<Path>, program_id: &ProgramId) -> Result<RecoveredLog> {
    let mut reader = BufReader::new(File::open(path.as_ref())?);
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.len() < HEADER_LEN {
        return Err(EventLogError::InvalidHeader.into());
    }
    EventLogHeader::read_from(&buffer[..HEADER_LEN])?.validate(program_id)?;

    let mut events = Vec::new();
    let mut offset = HEADER_LEN;
    let mut seq = 0u64;

    while offset < buffer.len() {
        let remaining = buffer.len() - offset;
        if remaining < EntryHeader::SIZE {
            break;
        }

        let header = EntryHeader::read_from(&buffer[offset..offset + EntryHeader::SIZE])?;
        let payload_start = offset + EntryHeader::SIZE;
        let payload_end = payload_start + header.payload_len as usize;
        if payload_end > buffer.len() {
            break;
        }
        let payload = &buffer[payload_start..payload_end];

        let found = entry_checksum(header.seq, payload);
        if found != header.checksum {
            if payload_end == buffer.len() {
                // Length landed but the bytes did not.
                break;
            }
            return Err(ReplayError::ChecksumMismatch {
                seq: header.seq,
                expected: header.checksum,
                found,
            });
        }

        if header.seq != seq {
            return Err(ReplayError::Corrupted {
                offset: offset as u64,
                reason: format!("expected entry {}, found {}", seq, header.seq),
            });
        }

        let (batch, read) =
            bincode::serde::decode_from_slice::<Vec<LedgerEvent>, _>(payload, bincode::config::standard())
                .map_err(|e| ReplayError::Deserialization {
                    seq,
                    reason: e.to_string(),
                })?;
        if read != payload.len() {
            return Err(ReplayError::Deserialization {
                seq,
                reason: format!("{} trailing bytes", payload.len() - read),
            });
        }

        events.extend(batch);
        offset = payload_end;
        seq += 1;
    }

    let torn_bytes = (buffer.len() - offset) as u64;
    if torn_bytes > 0 {
        tracing::warn!(
            offset,
            torn_bytes,
            "Ignoring incomplete entry at end of event log"
        );
    }

    Ok(RecoveredLog {
        events,
        position: LogPosition {
            entry_count: seq,
            valid_len: offset as u64,
            torn_bytes,
        },
    })
}

/// Full recovery from an event log.
///
/// The oracle is not consulted for logged events.
pub fn recover_from_event_log<O: ProofOracle>(
    path: impl AsRef<Path>,
    oracle: O,
    config: LedgerConfig,
) -> Result<(VerificationLedger<O>, LogPosition)> {
    tracing::info!(path = %path.as_ref().display(), "Starting recovery from event log");
    let start = Instant::now();

    let recovered = read_event_log(path, &config.program_id)?;
    let position = recovered.position;
    tracing::info!(
        entries = position.entry_count,
        events = recovered.events.len(),
        "Loaded event log"
    );

    let ledger = VerificationLedger::restore(oracle, config, recovered.events)?;
    metrics::histogram!(REPLAY_DURATION, start.elapsed().as_secs_f64());
    metrics::gauge!(LEDGER_HEIGHT, ledger.height().0 as f64);
    tracing::info!(
        height = ledger.height().0,
        digest = %ledger.state_digest(),
        "Replay complete"
    );

    Ok((ledger, position))
}
