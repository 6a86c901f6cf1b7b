// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Proof-verification capability.
//!
//! The ledger never looks inside a seal. It hands the seal, its configured
//! program id and the journal digest to a `ProofOracle` and trusts the answer.

use crate::types::{Hash, ProgramId};
use sha2::{Digest, Sha256};
use std::sync::Arc;

pub trait ProofOracle {
    /// Must be free of side effects visible to the ledger.
    fn verify(&self, seal: &[u8], program_id: &ProgramId, journal_digest: &Hash) -> bool;
}

impl<T: ProofOracle + ?Sized> ProofOracle for &T {
    fn verify(&self, seal: &[u8], program_id: &ProgramId, journal_digest: &Hash) -> bool {
        (**self).verify(seal, program_id, journal_digest)
    }
}

impl<T: ProofOracle + ?Sized> ProofOracle for Box<T> {
    fn verify(&self, seal: &[u8], program_id: &ProgramId, journal_digest: &Hash) -> bool {
        (**self).verify(seal, program_id, journal_digest)
    }
}

impl<T: ProofOracle + ?Sized> ProofOracle for Arc<T> {
    fn verify(&self, seal: &[u8], program_id: &ProgramId, journal_digest: &Hash) -> bool {
        (**self).verify(seal, program_id, journal_digest)
    }
}

/// SHA-256 over the full journal, trailing bytes included.
pub fn journal_digest(journal: &[u8]) -> Hash {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(journal));
    Hash(out)
}

/// Development-mode seal: a keyed BLAKE3 MAC of the journal digest under the
/// program id. Anyone holding the program id can forge it.
pub fn dev_seal(program_id: &ProgramId, journal: &[u8]) -> Vec<u8> {
    dev_seal_for_digest(program_id, &journal_digest(journal))
}

fn dev_seal_for_digest(program_id: &ProgramId, digest: &Hash) -> Vec<u8> {
    blake3::keyed_hash(program_id.as_bytes(), digest.as_bytes())
        .as_bytes()
        .to_vec()
}

/// Accepts exactly the seals produced by [`dev_seal`].
#[derive(Clone, Copy, Debug, Default)]
pub struct DevModeOracle;

impl ProofOracle for DevModeOracle {
    fn verify(&self, seal: &[u8], program_id: &ProgramId, journal_digest: &Hash) -> bool {
        seal == dev_seal_for_digest(program_id, journal_digest).as_slice()
    }
}

/// Oracle backed by a closure.
pub struct FnOracle<F>(pub F);

impl<F> FnOracle<F>
where
    F: Fn(&[u8], &ProgramId, &Hash) -> bool,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> ProofOracle for FnOracle<F>
where
    F: Fn(&[u8], &ProgramId, &Hash) -> bool,
{
    fn verify(&self, seal: &[u8], program_id: &ProgramId, journal_digest: &Hash) -> bool {
        (self.0)(seal, program_id, journal_digest)
    }
}
