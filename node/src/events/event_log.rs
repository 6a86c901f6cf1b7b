// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Append-Only Event Log Writer
//!
//! This is the canonical durability layer. Events reach disk, fsync'd,
//! before the in-memory ledger commits them. One entry holds every event of
//! one committed call, so a batch is all-or-nothing on disk as well.
//!
//! # File Format
//! ```text
//! [Header: 40 bytes][Entry][Entry]...
//! ```
//!
//! Header:
//! - magic: "TKLG"
//! - version: u32 (1)
//! - program_id: 32 bytes
//!
//! Entry (little-endian):
//! - seq: u64, starting at 0
//! - payload_len: u32
//! - checksum: u64, CRC-64 over seq, payload_len and payload
//! - payload: bincode `Vec<LedgerEvent>`

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use crc64fast::Digest;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use transition_kernel::ledger::LedgerEvent;
use transition_kernel::ProgramId;

pub const MAGIC: [u8; 4] = *b"TKLG";
pub const LOG_VERSION: u32 = 1;
pub const HEADER_LEN: usize = 4 + 4 + 32;

#[derive(Error, Debug)]
pub enum EventLogError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid header")]
    InvalidHeader,

    #[error("Log belongs to program {log}, expected {expected}")]
    ProgramMismatch { log: ProgramId, expected: ProgramId },

    #[error("Entry too large: {0} bytes")]
    EntryTooLarge(usize),
}

pub type Result<T> = std::result::Result<T, EventLogError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventLogHeader {
    pub version: u32,
    pub program_id: ProgramId,
}

impl EventLogHeader {
    pub fn new(program_id: ProgramId) -> Self {
        Self {
            version: LOG_VERSION,
            program_id,
        }
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(&MAGIC)?;
        writer.write_u32::<LittleEndian>(self.version)?;
        writer.write_all(self.program_id.as_bytes())
    }

    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(EventLogError::InvalidHeader);
        }
        let version = reader.read_u32::<LittleEndian>()?;
        let mut program = [0u8; 32];
        reader.read_exact(&mut program)?;

        Ok(Self {
            version,
            program_id: ProgramId(program),
        })
    }

    pub fn validate(&self, expected: &ProgramId) -> Result<()> {
        if self.version != LOG_VERSION {
            return Err(EventLogError::InvalidHeader);
        }
        if self.program_id != *expected {
            return Err(EventLogError::ProgramMismatch {
                log: self.program_id,
                expected: *expected,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryHeader {
    pub seq: u64,
    pub payload_len: u32,
    pub checksum: u64,
}

impl EntryHeader {
    pub const SIZE: usize = 8 + 4 + 8;

    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_u64::<LittleEndian>(self.seq)?;
        writer.write_u32::<LittleEndian>(self.payload_len)?;
        writer.write_u64::<LittleEndian>(self.checksum)
    }

    pub fn read_from<R: Read>(mut reader: R) -> io::Result<Self> {
        Ok(Self {
            seq: reader.read_u64::<LittleEndian>()?,
            payload_len: reader.read_u32::<LittleEndian>()?,
            checksum: reader.read_u64::<LittleEndian>()?,
        })
    }
}

pub fn entry_checksum(seq: u64, payload: &[u8]) -> u64 {
    let mut digest = Digest::new();
    digest.write(&seq.to_le_bytes());
    digest.write(&(payload.len() as u32).to_le_bytes());
    digest.write(payload);
    digest.sum64()
}

pub fn encode_events(events: &[LedgerEvent]) -> Result<Vec<u8>> {
    bincode::serde::encode_to_vec(events, bincode::config::standard())
        .map_err(|e| EventLogError::Serialization(e.to_string()))
}

/// Append-Only Event Log Writer
///
/// Each append is written with a single `write_all` and fsync'd before
/// returning. A failed append truncates the file back to the last complete
/// entry.
pub struct EventLogWriter {
    path: PathBuf,
    file: File,
    next_seq: u64,
    len: u64,
}

impl EventLogWriter {
    /// Creates a new log containing only the header.
    pub fn create(path: impl AsRef<Path>, program_id: ProgramId) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut file = OpenOptions::new().create_new(true).append(true).open(&path)?;

        let mut header = Vec::with_capacity(HEADER_LEN);
        EventLogHeader::new(program_id).write_to(&mut header)?;
        file.write_all(&header)?;
        file.sync_all()?;

        Ok(Self {
            path,
            file,
            next_seq: 0,
            len: HEADER_LEN as u64,
        })
    }

    /// Reopens a log that has already been scanned.
    ///
    /// `valid_len` is the offset just past the last complete entry; anything
    /// after it is a torn tail and gets truncated so new entries follow a
    /// complete one.
    pub fn resume(path: impl AsRef<Path>, entry_count: u64, valid_len: u64) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().append(true).open(&path)?;

        if file.metadata()?.len() > valid_len {
            tracing::warn!(path = %path.display(), valid_len, "Truncating torn tail of event log");
            file.set_len(valid_len)?;
            file.sync_all()?;
        }

        Ok(Self {
            path,
            file,
            next_seq: entry_count,
            len: valid_len,
        })
    }

    /// Wraps an already-open handle positioned after `len` valid bytes.
    #[cfg(test)]
    pub(crate) fn from_file(path: impl AsRef<Path>, file: File, entry_count: u64, len: u64) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            file,
            next_seq: entry_count,
            len,
        }
    }

    /// Appends one entry holding `events` and returns its sequence number.
    ///
    /// Only returns `Ok` after a durable write.
    pub fn append(&mut self, events: &[LedgerEvent]) -> Result<u64> {
        let payload = encode_events(events)?;
        let payload_len =
            u32::try_from(payload.len()).map_err(|_| EventLogError::EntryTooLarge(payload.len()))?;

        let seq = self.next_seq;
        let header = EntryHeader {
            seq,
            payload_len,
            checksum: entry_checksum(seq, &payload),
        };

        let mut entry = Vec::with_capacity(EntryHeader::SIZE + payload.len());
        header.write_to(&mut entry)?;
        entry.extend_from_slice(&payload);

        if let Err(e) = self.write_durably(&entry) {
            // Best effort: drop any partial entry so the next append follows
            // a complete one.
            if let Err(trunc) = self.file.set_len(self.len) {
                tracing::error!(error = %trunc, "Failed to truncate partial entry");
            }
            return Err(e.into());
        }

        self.next_seq += 1;
        self.len += entry.len() as u64;
        Ok(seq)
    }

    fn write_durably(&mut self, entry: &[u8]) -> io::Result<()> {
        self.file.write_all(entry)?;
        self.file.sync_data()
    }

    /// Number of entries in the log.
    pub fn entry_count(&self) -> u64 {
        self.next_seq
    }

    /// Bytes of header plus complete entries.
    pub fn byte_len(&self) -> u64 {
        self.len
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use transition_kernel::Hash;

    fn event(byte: u8) -> LedgerEvent {
        LedgerEvent::StateTransitionRecorded {
            pre_state_root: Hash::repeat_byte(byte),
            post_state_root: Hash::repeat_byte(byte + 1),
            commitment_id: Hash::repeat_byte(byte + 2),
        }
    }

    #[test]
    fn test_event_log_create_and_append() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.log");

        let mut writer = EventLogWriter::create(&path, ProgramId::repeat_byte(1)).unwrap();
        assert_eq!(writer.append(&[event(1), event(2)]).unwrap(), 0);
        assert_eq!(writer.append(&[event(3)]).unwrap(), 1);

        assert_eq!(writer.entry_count(), 2);
        assert_eq!(std::fs::metadata(&path).unwrap().len(), writer.byte_len());
    }

    #[test]
    fn test_create_refuses_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.log");
        EventLogWriter::create(&path, ProgramId::ZERO).unwrap();
        assert!(EventLogWriter::create(&path, ProgramId::ZERO).is_err());
    }

    #[test]
    fn test_header_layout() {
        let mut bytes = Vec::new();
        EventLogHeader::new(ProgramId::repeat_byte(9)).write_to(&mut bytes).unwrap();

        assert_eq!(bytes.len(), HEADER_LEN);
        assert_eq!(&bytes[0..4], b"TKLG");
        assert_eq!(&bytes[4..8], &1u32.to_le_bytes());
        assert_eq!(&bytes[8..40], &[9u8; 32]);

        let header = EventLogHeader::read_from(&bytes[..]).unwrap();
        assert!(header.validate(&ProgramId::repeat_byte(9)).is_ok());
        assert!(matches!(
            header.validate(&ProgramId::repeat_byte(8)),
            Err(EventLogError::ProgramMismatch { .. })
        ));
    }

    #[test]
    fn test_failed_append_keeps_length_and_sequence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.log");
        drop(EventLogWriter::create(&path, ProgramId::ZERO).unwrap());

        let read_only = File::open(&path).unwrap();
        let mut writer = EventLogWriter::from_file(&path, read_only, 0, HEADER_LEN as u64);

        assert!(matches!(writer.append(&[event(1)]), Err(EventLogError::Io(_))));
        assert_eq!(writer.entry_count(), 0);
        assert_eq!(writer.byte_len(), HEADER_LEN as u64);
        assert_eq!(std::fs::metadata(&path).unwrap().len(), writer.byte_len());
    }

    #[test]
    fn test_bad_magic_rejected() {
        let mut bytes = vec![0u8; HEADER_LEN];
        bytes[0..4].copy_from_slice(b"WALX");
        assert!(matches!(
            EventLogHeader::read_from(&bytes[..]),
            Err(EventLogError::InvalidHeader)
        ));
    }
}
