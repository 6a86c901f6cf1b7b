// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Canonical BLAKE3 Hashing
//!
//! Every hash that ends up in a commitment is produced here. Structures are
//! never hashed through a generic serializer: fields are fed one by one in a
//! frozen order so the encoding cannot drift with a dependency upgrade.
//!
//! # Encoding
//! ```text
//! domain tag (length-prefixed)
//! integers        -> little-endian, fixed width
//! byte strings    -> u64 LE length, then bytes
//! options         -> 0x00 | 0x01 followed by the value
//! sequences       -> u64 LE count, then each element
//! ```
//!
//! Changing any of this changes every commitment id, so the domain tags carry
//! a version suffix that must be bumped alongside.

use crate::types::{Address, Hash};

pub const STATE_ROOT_DOMAIN: &[u8] = b"transition-kernel/state-root/v1";
pub const INPUT_DOMAIN: &[u8] = b"transition-kernel/execution-input/v1";
pub const OUTPUT_DOMAIN: &[u8] = b"transition-kernel/execution-output/v1";
pub const CREATE_DOMAIN: &[u8] = b"transition-kernel/create-address/v1";
pub const LEDGER_DOMAIN: &[u8] = b"transition-kernel/ledger-state/v1";

pub struct CanonicalHasher {
    inner: blake3::Hasher,
}

impl CanonicalHasher {
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Self {
            inner: blake3::Hasher::new(),
        };
        hasher.write_bytes(domain);
        hasher
    }

    pub fn write_u8(&mut self, val: u8) -> &mut Self {
        self.inner.update(&[val]);
        self
    }

    pub fn write_u64(&mut self, val: u64) -> &mut Self {
        self.inner.update(&val.to_le_bytes());
        self
    }

    pub fn write_u128(&mut self, val: u128) -> &mut Self {
        self.inner.update(&val.to_le_bytes());
        self
    }

    pub fn write_len(&mut self, len: usize) -> &mut Self {
        self.write_u64(len as u64)
    }

    /// Length-prefixed byte string.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.write_len(bytes.len());
        self.inner.update(bytes);
        self
    }

    pub fn write_hash(&mut self, hash: &Hash) -> &mut Self {
        self.inner.update(hash.as_bytes());
        self
    }

    pub fn write_address(&mut self, address: &Address) -> &mut Self {
        self.inner.update(address.as_bytes());
        self
    }

    pub fn write_opt_address(&mut self, address: Option<&Address>) -> &mut Self {
        match address {
            Some(addr) => self.write_u8(1).write_address(addr),
            None => self.write_u8(0),
        }
    }

    pub fn finalize(&self) -> Hash {
        Hash(*self.inner.finalize().as_bytes())
    }
}

/// Plain BLAKE3 of a byte slice.
pub fn hash_bytes(data: &[u8]) -> Hash {
    Hash(*blake3::hash(data).as_bytes())
}

/// BLAKE3 of the concatenation of `parts`, without length prefixes.
pub fn hash_concat(parts: &[&[u8]]) -> Hash {
    let mut hasher = blake3::Hasher::new();
    for part in parts {
        hasher.update(part);
    }
    Hash(*hasher.finalize().as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_concat_matches_flat_hash() {
        assert_eq!(hash_concat(&[b"hello", b"world"]), hash_bytes(b"helloworld"));
    }

    #[test]
    fn test_domains_separate() {
        let a = CanonicalHasher::new(INPUT_DOMAIN).finalize();
        let b = CanonicalHasher::new(OUTPUT_DOMAIN).finalize();
        assert_ne!(a, b);
    }

    #[test]
    fn test_length_prefix_disambiguates() {
        let mut h1 = CanonicalHasher::new(INPUT_DOMAIN);
        h1.write_bytes(b"ab").write_bytes(b"c");
        let mut h2 = CanonicalHasher::new(INPUT_DOMAIN);
        h2.write_bytes(b"a").write_bytes(b"bc");
        assert_ne!(h1.finalize(), h2.finalize());
    }
}
