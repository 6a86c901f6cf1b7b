// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Ledger events.

use crate::types::{Address, Hash};
use serde::{Deserialize, Serialize};

/// Observable record of an accepted commitment.
///
/// Every acceptance emits exactly two events, in this order:
/// `ExecutionVerified` then `StateTransitionRecorded`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    ExecutionVerified {
        commitment_id: Hash,
        pre_state_root: Hash,
        post_state_root: Hash,
        submitter: Address,
    },
    StateTransitionRecorded {
        pre_state_root: Hash,
        post_state_root: Hash,
        commitment_id: Hash,
    },
}

impl LedgerEvent {
    pub fn commitment_id(&self) -> Hash {
        match self {
            LedgerEvent::ExecutionVerified { commitment_id, .. } => *commitment_id,
            LedgerEvent::StateTransitionRecorded { commitment_id, .. } => *commitment_id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LedgerEvent::ExecutionVerified { .. } => "ExecutionVerified",
            LedgerEvent::StateTransitionRecorded { .. } => "StateTransitionRecorded",
        }
    }
}
