// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Journal codec.
//!
//! # Layout (wire contract, 160 bytes)
//! ```text
//! [  0.. 32) input_hash
//! [ 32.. 64) output_hash
//! [ 64.. 96) pre_state_root
//! [ 96..128) post_state_root
//! [128..160) commitment_id
//! ```
//! Each field is copied verbatim as a 32-byte word. Bytes beyond offset 160
//! are not decoded.

use crate::commitment::builder::ExecutionCommitment;
use crate::error::JournalError;
use crate::types::Hash;

pub const WORD_LEN: usize = 32;
pub const JOURNAL_LEN: usize = 5 * WORD_LEN;

pub const INPUT_HASH_OFFSET: usize = 0;
pub const OUTPUT_HASH_OFFSET: usize = WORD_LEN;
pub const PRE_STATE_ROOT_OFFSET: usize = 2 * WORD_LEN;
pub const POST_STATE_ROOT_OFFSET: usize = 3 * WORD_LEN;
pub const COMMITMENT_ID_OFFSET: usize = 4 * WORD_LEN;

pub fn encode_journal(commitment: &ExecutionCommitment) -> [u8; JOURNAL_LEN] {
    let mut out = [0u8; JOURNAL_LEN];
    let fields = [
        (INPUT_HASH_OFFSET, &commitment.input_hash),
        (OUTPUT_HASH_OFFSET, &commitment.output_hash),
        (PRE_STATE_ROOT_OFFSET, &commitment.pre_state_root),
        (POST_STATE_ROOT_OFFSET, &commitment.post_state_root),
        (COMMITMENT_ID_OFFSET, &commitment.commitment_id),
    ];
    for (offset, word) in fields {
        out[offset..offset + WORD_LEN].copy_from_slice(word.as_bytes());
    }
    out
}

/// Decodes the five fixed-offset words.
///
/// The length is checked once up front; after that the decode is purely
/// positional and the commitment id is taken as given, not recomputed.
pub fn decode_journal(bytes: &[u8]) -> Result<ExecutionCommitment, JournalError> {
    if bytes.len() < JOURNAL_LEN {
        return Err(JournalError::TooShort {
            expected: JOURNAL_LEN,
            found: bytes.len(),
        });
    }

    let word = |offset: usize| {
        let mut out = [0u8; WORD_LEN];
        out.copy_from_slice(&bytes[offset..offset + WORD_LEN]);
        Hash(out)
    };

    Ok(ExecutionCommitment {
        input_hash: word(INPUT_HASH_OFFSET),
        output_hash: word(OUTPUT_HASH_OFFSET),
        pre_state_root: word(PRE_STATE_ROOT_OFFSET),
        post_state_root: word(POST_STATE_ROOT_OFFSET),
        commitment_id: word(COMMITMENT_ID_OFFSET),
    })
}
