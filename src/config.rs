// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Ledger configuration.

use crate::types::ProgramId;
use serde::{Deserialize, Serialize};

/// What happens when a pre-state root that already has an edge is verified
/// again with a different post-state root.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgePolicy {
    /// Last writer wins.
    #[default]
    Overwrite,
    /// Fail with `StateRootCollision`.
    RejectConflict,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// The only program whose proofs this ledger accepts.
    pub program_id: ProgramId,
    pub edge_policy: EdgePolicy,
}

impl LedgerConfig {
    pub fn new(program_id: ProgramId) -> Self {
        Self {
            program_id,
            edge_policy: EdgePolicy::default(),
        }
    }

    pub fn with_edge_policy(mut self, edge_policy: EdgePolicy) -> Self {
        self.edge_policy = edge_policy;
        self
    }
}
