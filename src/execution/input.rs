// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Execution inputs.
//!
//! Everything an execution may observe is carried here. Nothing is read from
//! a wall clock or a syscall, so the same input replays identically anywhere.

use crate::error::CodecError;
use crate::hashing::{CanonicalHasher, INPUT_DOMAIN};
use crate::state::StateStore;
use crate::types::{Address, BlockNumber, Gas, Hash, Timestamp, Wei};
use serde::{Deserialize, Serialize};

pub const GWEI: Wei = 1_000_000_000;

/// Block-level parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionEnvironment {
    pub number: BlockNumber,
    pub timestamp: Timestamp,
    pub gas_limit: Gas,
    /// Fee basis per unit of gas, burned.
    pub base_fee: Wei,
    /// Receives the priority part of the fee.
    pub beneficiary: Address,
    pub prev_randao: Hash,
    pub chain_id: u64,
}

impl Default for ExecutionEnvironment {
    fn default() -> Self {
        Self {
            number: 1,
            timestamp: 1_700_000_000,
            gas_limit: 30_000_000,
            base_fee: GWEI,
            beneficiary: Address::ZERO,
            prev_randao: Hash::ZERO,
            chain_id: 1,
        }
    }
}

impl ExecutionEnvironment {
    pub fn new(number: BlockNumber, timestamp: Timestamp, gas_limit: Gas, chain_id: u64) -> Self {
        Self {
            number,
            timestamp,
            gas_limit,
            chain_id,
            ..Default::default()
        }
    }

    /// Local development chain.
    pub fn testnet() -> Self {
        Self {
            chain_id: 31337,
            ..Default::default()
        }
    }

    pub fn with_beneficiary(mut self, beneficiary: Address) -> Self {
        self.beneficiary = beneficiary;
        self
    }

    pub fn with_base_fee(mut self, base_fee: Wei) -> Self {
        self.base_fee = base_fee;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub caller: Address,
    /// `None` deploys `data` as a new contract.
    pub to: Option<Address>,
    pub value: Wei,
    pub data: Vec<u8>,
    pub gas_limit: Gas,
    pub gas_price: Wei,
    pub nonce: u64,
}

impl Default for Transaction {
    fn default() -> Self {
        Self {
            caller: Address::ZERO,
            to: None,
            value: 0,
            data: Vec::new(),
            gas_limit: 10_000_000,
            gas_price: GWEI,
            nonce: 0,
        }
    }
}

impl Transaction {
    pub fn call(caller: Address, to: Address, data: Vec<u8>) -> Self {
        Self {
            caller,
            to: Some(to),
            data,
            ..Default::default()
        }
    }

    pub fn transfer(caller: Address, to: Address, value: Wei) -> Self {
        Self {
            caller,
            to: Some(to),
            value,
            gas_limit: 21_000,
            ..Default::default()
        }
    }

    pub fn create(caller: Address, code: Vec<u8>, value: Wei) -> Self {
        Self {
            caller,
            to: None,
            data: code,
            value,
            ..Default::default()
        }
    }

    pub fn is_create(&self) -> bool {
        self.to.is_none()
    }

    pub fn with_gas_limit(mut self, gas_limit: Gas) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    pub fn with_gas_price(mut self, gas_price: Wei) -> Self {
        self.gas_price = gas_price;
        self
    }

    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }
}

/// Complete input of one execution. Built by the caller before any proving.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionInput {
    pub env: ExecutionEnvironment,
    pub tx: Transaction,
    pub pre_state: StateStore,
}

impl ExecutionInput {
    pub fn new(env: ExecutionEnvironment, tx: Transaction, pre_state: StateStore) -> Self {
        Self { env, tx, pre_state }
    }

    /// Canonical hash. The pre-state enters through its root.
    pub fn hash(&self) -> Hash {
        let env = &self.env;
        let tx = &self.tx;
        let mut hasher = CanonicalHasher::new(INPUT_DOMAIN);

        hasher
            .write_u64(env.number)
            .write_u64(env.timestamp)
            .write_u64(env.gas_limit)
            .write_u128(env.base_fee)
            .write_address(&env.beneficiary)
            .write_hash(&env.prev_randao)
            .write_u64(env.chain_id);

        hasher
            .write_address(&tx.caller)
            .write_opt_address(tx.to.as_ref())
            .write_u128(tx.value)
            .write_bytes(&tx.data)
            .write_u64(tx.gas_limit)
            .write_u128(tx.gas_price)
            .write_u64(tx.nonce);

        hasher.write_hash(&self.pre_state_root());
        hasher.finalize()
    }

    pub fn pre_state_root(&self) -> Hash {
        self.pre_state.compute_state_root()
    }

    /// Wire form handed to the proving collaborator.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        bincode::serde::encode_to_vec(self, bincode::config::standard())
            .map_err(|e| CodecError::Serialization(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        let (input, read) = bincode::serde::decode_from_slice::<Self, _>(bytes, bincode::config::standard())
            .map_err(|e| CodecError::Deserialization(e.to_string()))?;
        if read != bytes.len() {
            return Err(CodecError::Deserialization(format!(
                "{} trailing bytes after input",
                bytes.len() - read
            )));
        }
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AccountState;

    #[test]
    fn test_transfer_defaults() {
        let tx = Transaction::transfer(Address::repeat_byte(1), Address::repeat_byte(2), 5);
        assert_eq!(tx.gas_limit, 21_000);
        assert!(!tx.is_create());
        assert!(Transaction::create(Address::repeat_byte(1), vec![1], 0).is_create());
    }

    #[test]
    fn test_hash_tracks_environment() {
        let a = ExecutionInput::new(
            ExecutionEnvironment::new(1, 1000, 30_000_000, 1),
            Transaction::default(),
            StateStore::new(),
        );
        let b = ExecutionInput::new(
            ExecutionEnvironment::new(2, 1000, 30_000_000, 1),
            Transaction::default(),
            StateStore::new(),
        );
        assert_ne!(a.hash(), b.hash());
        assert_eq!(a.hash(), a.clone().hash());
    }

    #[test]
    fn test_codec_preserves_hash() {
        let mut state = StateStore::new();
        state.write(Address::repeat_byte(1), AccountState::new_with_balance(1_000));
        let input = ExecutionInput::new(
            ExecutionEnvironment::testnet(),
            Transaction::transfer(Address::repeat_byte(1), Address::repeat_byte(2), 10),
            state,
        );

        let bytes = input.to_bytes().unwrap();
        let decoded = ExecutionInput::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, input);
        assert_eq!(decoded.hash(), input.hash());
    }

    #[test]
    fn test_codec_rejects_trailing_bytes() {
        let input = ExecutionInput::new(
            ExecutionEnvironment::default(),
            Transaction::default(),
            StateStore::new(),
        );
        let mut bytes = input.to_bytes().unwrap();
        bytes.push(0);
        assert!(ExecutionInput::from_bytes(&bytes).is_err());
    }
}
