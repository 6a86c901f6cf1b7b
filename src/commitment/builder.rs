// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Execution commitments.

use crate::commitment::journal::{decode_journal, encode_journal, JOURNAL_LEN};
use crate::error::JournalError;
use crate::execution::{ExecutionInput, ExecutionOutput};
use crate::hashing::hash_concat;
use crate::types::Hash;
use serde::{Deserialize, Serialize};

/// Binds one execution: what went in, what came out, and the state roots on
/// either side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExecutionCommitment {
    pub input_hash: Hash,
    pub output_hash: Hash,
    pub pre_state_root: Hash,
    pub post_state_root: Hash,
    /// `BLAKE3(input_hash ‖ output_hash ‖ pre_state_root ‖ post_state_root)`
    pub commitment_id: Hash,
}

impl ExecutionCommitment {
    pub fn new(input_hash: Hash, output_hash: Hash, pre_state_root: Hash, post_state_root: Hash) -> Self {
        let commitment_id = Self::compute_id(&input_hash, &output_hash, &pre_state_root, &post_state_root);
        Self {
            input_hash,
            output_hash,
            pre_state_root,
            post_state_root,
            commitment_id,
        }
    }

    pub fn compute_id(input_hash: &Hash, output_hash: &Hash, pre_state_root: &Hash, post_state_root: &Hash) -> Hash {
        hash_concat(&[
            input_hash.as_bytes(),
            output_hash.as_bytes(),
            pre_state_root.as_bytes(),
            post_state_root.as_bytes(),
        ])
    }

    pub fn from_execution(input: &ExecutionInput, output: &ExecutionOutput) -> Self {
        Self::new(
            input.hash(),
            output.hash(),
            input.pre_state_root(),
            output.post_state_root(),
        )
    }

    /// Recomputes every field from `input` and `output` and compares.
    pub fn matches(&self, input: &ExecutionInput, output: &ExecutionOutput) -> bool {
        *self == Self::from_execution(input, output)
    }

    /// True when `commitment_id` is consistent with the other four fields.
    pub fn is_well_formed(&self) -> bool {
        self.commitment_id
            == Self::compute_id(
                &self.input_hash,
                &self.output_hash,
                &self.pre_state_root,
                &self.post_state_root,
            )
    }

    pub fn to_journal(&self) -> [u8; JOURNAL_LEN] {
        encode_journal(self)
    }

    pub fn from_journal(bytes: &[u8]) -> Result<Self, JournalError> {
        decode_journal(bytes)
    }
}

pub fn compute_commitment(input: &ExecutionInput, output: &ExecutionOutput) -> ExecutionCommitment {
    ExecutionCommitment::from_execution(input, output)
}
