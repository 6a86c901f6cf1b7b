// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Deterministic State Store.

use crate::hashing::{CanonicalHasher, STATE_ROOT_DOMAIN};
use crate::state::account::AccountState;
use crate::types::{Address, Hash};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Canonical account container.
///
/// Backed by a `BTreeMap` so iteration is always in ascending address order,
/// whatever order the accounts were written in. Decoding goes through
/// `write`, so empty accounts never survive a round trip through the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireStore")]
pub struct StateStore {
    accounts: BTreeMap<Address, AccountState>,
}

#[derive(Deserialize)]
struct WireStore {
    accounts: BTreeMap<Address, AccountState>,
}

impl From<WireStore> for StateStore {
    fn from(wire: WireStore) -> Self {
        wire.accounts.into_iter().collect()
    }
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero-valued default when the account is absent.
    pub fn read(&self, address: &Address) -> AccountState {
        self.accounts.get(address).cloned().unwrap_or_default()
    }

    /// Writing an empty account removes it.
    pub fn write(&mut self, address: Address, account: AccountState) {
        if account.is_empty() {
            self.accounts.remove(&address);
        } else {
            self.accounts.insert(address, account);
        }
    }

    pub fn get(&self, address: &Address) -> Option<&AccountState> {
        self.accounts.get(address)
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.accounts.contains_key(address)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Address, &AccountState)> {
        self.accounts.iter()
    }

    /// Computes the state root.
    ///
    /// # Hash Input Structure
    /// ```text
    /// domain tag
    /// account count (u64 LE)
    /// For each account (ascending address):
    ///   address (20 bytes)
    ///   nonce (u64 LE)
    ///   balance (u128 LE)
    ///   code (u64 LE length + bytes)
    ///   slot count (u64 LE)
    ///   For each slot (ascending): slot (32 bytes), value (32 bytes)
    /// ```
    pub fn compute_state_root(&self) -> Hash {
        let mut hasher = CanonicalHasher::new(STATE_ROOT_DOMAIN);
        hasher.write_len(self.accounts.len());

        for (address, account) in &self.accounts {
            hasher
                .write_address(address)
                .write_u64(account.nonce)
                .write_u128(account.balance)
                .write_bytes(&account.code)
                .write_len(account.storage.len());
            for (slot, value) in &account.storage {
                hasher.write_hash(slot).write_hash(value);
            }
        }

        hasher.finalize()
    }
}

impl FromIterator<(Address, AccountState)> for StateStore {
    fn from_iter<I: IntoIterator<Item = (Address, AccountState)>>(iter: I) -> Self {
        let mut store = StateStore::new();
        for (address, account) in iter {
            store.write(address, account);
        }
        store
    }
}
