// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Files exchanged with the off-chain prover.
//!
//! A submission bundle is JSON with hex strings:
//! ```json
//! { "programId": "…", "seal": "…", "journal": "…" }
//! ```
//! `imageId` is accepted as an alias for `programId`. A `0x` prefix is
//! optional on read and never written.

use crate::errors::{NodeError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use transition_kernel::{decode_journal, ExecutionCommitment, ExecutionInput, ProgramId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub program_id: ProgramId,
    pub seal: Vec<u8>,
    pub journal: Vec<u8>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmissionFile {
    #[serde(alias = "imageId")]
    program_id: String,
    seal: String,
    journal: String,
}

fn decode_hex(field: &'static str, text: &str) -> Result<Vec<u8>> {
    hex::decode(text.trim_start_matches("0x")).map_err(|e| NodeError::InvalidHex {
        field,
        reason: e.to_string(),
    })
}

impl Submission {
    pub fn new(program_id: ProgramId, seal: Vec<u8>, journal: Vec<u8>) -> Self {
        Self {
            program_id,
            seal,
            journal,
        }
    }

    /// Decodes the journal without any oracle check.
    pub fn commitment(&self) -> Result<ExecutionCommitment> {
        Ok(decode_journal(&self.journal)?)
    }

    pub fn to_json(&self) -> Result<String> {
        let file = SubmissionFile {
            program_id: hex::encode(self.program_id.as_bytes()),
            seal: hex::encode(&self.seal),
            journal: hex::encode(&self.journal),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: SubmissionFile = serde_json::from_str(json)?;

        let program = decode_hex("programId", &file.program_id)?;
        let program_id = ProgramId::from_slice(&program).ok_or_else(|| NodeError::InvalidHex {
            field: "programId",
            reason: format!("expected {} bytes, found {}", ProgramId::LEN, program.len()),
        })?;

        Ok(Self {
            program_id,
            seal: decode_hex("seal", &file.seal)?,
            journal: decode_hex("journal", &file.journal)?,
        })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }
}

/// Saves an execution input as JSON for the prover.
pub fn save_input_json(input: &ExecutionInput, path: impl AsRef<Path>) -> Result<()> {
    std::fs::write(path, serde_json::to_string_pretty(input)?)?;
    Ok(())
}

pub fn load_input_json(path: impl AsRef<Path>) -> Result<ExecutionInput> {
    Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?)
}
