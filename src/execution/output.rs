// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Execution outputs.

use crate::hashing::{CanonicalHasher, OUTPUT_DOMAIN};
use crate::state::StateStore;
use crate::types::{Address, Gas, Hash};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    pub address: Address,
    pub topics: Vec<Hash>,
    pub data: Vec<u8>,
}

impl Log {
    pub fn new(address: Address, topics: Vec<Hash>, data: Vec<u8>) -> Self {
        Self { address, topics, data }
    }

    pub fn event_signature(&self) -> Option<Hash> {
        self.topics.first().copied()
    }
}

/// Transaction-level outcome. All three are provable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionOutcome {
    Success,
    Reverted,
    OutOfGas,
}

impl ExecutionOutcome {
    /// Tag byte in the canonical output hash. Frozen.
    pub fn tag(&self) -> u8 {
        match self {
            ExecutionOutcome::Success => 0,
            ExecutionOutcome::Reverted => 1,
            ExecutionOutcome::OutOfGas => 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionOutput {
    pub outcome: ExecutionOutcome,
    pub return_data: Vec<u8>,
    pub logs: Vec<Log>,
    pub gas_used: Gas,
    pub gas_refunded: Gas,
    pub post_state: StateStore,
    pub created_address: Option<Address>,
}

impl ExecutionOutput {
    pub fn success(return_data: Vec<u8>, gas_used: Gas, logs: Vec<Log>, post_state: StateStore) -> Self {
        Self {
            outcome: ExecutionOutcome::Success,
            return_data,
            logs,
            gas_used,
            gas_refunded: 0,
            post_state,
            created_address: None,
        }
    }

    /// Reverts keep their return data but drop logs.
    pub fn reverted(return_data: Vec<u8>, gas_used: Gas, post_state: StateStore) -> Self {
        Self {
            outcome: ExecutionOutcome::Reverted,
            return_data,
            logs: Vec::new(),
            gas_used,
            gas_refunded: 0,
            post_state,
            created_address: None,
        }
    }

    pub fn out_of_gas(gas_used: Gas, post_state: StateStore) -> Self {
        Self {
            outcome: ExecutionOutcome::OutOfGas,
            return_data: Vec::new(),
            logs: Vec::new(),
            gas_used,
            gas_refunded: 0,
            post_state,
            created_address: None,
        }
    }

    pub fn with_created_address(mut self, address: Address) -> Self {
        self.created_address = Some(address);
        self
    }

    pub fn is_success(&self) -> bool {
        self.outcome == ExecutionOutcome::Success
    }

    pub fn post_state_root(&self) -> Hash {
        self.post_state.compute_state_root()
    }

    /// Gas used net of refunds; the refund is capped at half the gas used.
    pub fn effective_gas_used(&self) -> Gas {
        let max_refund = self.gas_used / 2;
        self.gas_used - self.gas_refunded.min(max_refund)
    }

    /// Canonical hash. The post-state enters through its root.
    pub fn hash(&self) -> Hash {
        let mut hasher = CanonicalHasher::new(OUTPUT_DOMAIN);

        hasher
            .write_u8(self.outcome.tag())
            .write_bytes(&self.return_data)
            .write_len(self.logs.len());
        for log in &self.logs {
            hasher.write_address(&log.address).write_len(log.topics.len());
            for topic in &log.topics {
                hasher.write_hash(topic);
            }
            hasher.write_bytes(&log.data);
        }

        hasher
            .write_u64(self.gas_used)
            .write_u64(self.gas_refunded)
            .write_hash(&self.post_state_root())
            .write_opt_address(self.created_address.as_ref());

        hasher.finalize()
    }
}
