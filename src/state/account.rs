// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Account state.

use crate::hashing::hash_bytes;
use crate::types::{Hash, Wei};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Decoding drops zero-valued slots, so a decoded account hashes like one
/// built through `set_storage`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireAccount")]
pub struct AccountState {
    pub nonce: u64,
    pub balance: Wei,
    /// Runtime code, empty for externally owned accounts.
    pub code: Vec<u8>,
    /// Slot -> value. Zero values are never stored.
    pub storage: BTreeMap<Hash, Hash>,
}

#[derive(Deserialize)]
struct WireAccount {
    nonce: u64,
    balance: Wei,
    code: Vec<u8>,
    storage: BTreeMap<Hash, Hash>,
}

impl From<WireAccount> for AccountState {
    fn from(wire: WireAccount) -> Self {
        let mut account = AccountState {
            nonce: wire.nonce,
            balance: wire.balance,
            code: wire.code,
            storage: BTreeMap::new(),
        };
        for (slot, value) in wire.storage {
            account.set_storage(slot, value);
        }
        account
    }
}

impl AccountState {
    pub fn new_with_balance(balance: Wei) -> Self {
        Self {
            balance,
            ..Default::default()
        }
    }

    /// Contracts start at nonce 1.
    pub fn new_contract(code: Vec<u8>, balance: Wei) -> Self {
        Self {
            nonce: 1,
            balance,
            code,
            storage: BTreeMap::new(),
        }
    }

    pub fn is_contract(&self) -> bool {
        !self.code.is_empty()
    }

    /// Indistinguishable from an absent account.
    pub fn is_empty(&self) -> bool {
        self.nonce == 0 && self.balance == 0 && self.code.is_empty() && self.storage.is_empty()
    }

    pub fn code_hash(&self) -> Hash {
        hash_bytes(&self.code)
    }

    pub fn set_storage(&mut self, slot: Hash, value: Hash) {
        if value.is_zero() {
            self.storage.remove(&slot);
        } else {
            self.storage.insert(slot, value);
        }
    }

    pub fn get_storage(&self, slot: &Hash) -> Hash {
        self.storage.get(slot).copied().unwrap_or(Hash::ZERO)
    }
}
