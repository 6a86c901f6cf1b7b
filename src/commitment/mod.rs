// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod builder;
pub mod journal;

pub use builder::{compute_commitment, ExecutionCommitment};
pub use journal::{decode_journal, encode_journal, JOURNAL_LEN, WORD_LEN};
