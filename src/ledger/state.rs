// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Committed ledger state.

use crate::hashing::{CanonicalHasher, LEDGER_DOMAIN};
use crate::types::{Hash, Version};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// Outgoing edge of a pre-state root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEdge {
    pub post_state_root: Hash,
    /// Commitment that last wrote this edge.
    pub commitment_id: Hash,
}

/// Verified commitment ids plus the pre -> post transition graph.
///
/// Ids are never removed. `height` counts accepted commitments.
#[derive(Clone, Debug, Default)]
pub struct LedgerState {
    verified: FxHashSet<Hash>,
    edges: FxHashMap<Hash, TransitionEdge>,
    height: Version,
}

impl LedgerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_verified(&self, commitment_id: &Hash) -> bool {
        self.verified.contains(commitment_id)
    }

    pub fn edge(&self, pre_state_root: &Hash) -> Option<&TransitionEdge> {
        self.edges.get(pre_state_root)
    }

    pub fn height(&self) -> Version {
        self.height
    }

    pub fn verified_count(&self) -> usize {
        self.verified.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Marks `commitment_id` verified and writes its edge. Callers check
    /// replay and edge policy first.
    pub(crate) fn record(&mut self, commitment_id: Hash, pre_state_root: Hash, post_state_root: Hash) {
        self.verified.insert(commitment_id);
        self.edges.insert(
            pre_state_root,
            TransitionEdge {
                post_state_root,
                commitment_id,
            },
        );
        self.height = self.height.next();
    }

    /// Canonical digest of the verified set and the edge map.
    ///
    /// Hash sets iterate in arbitrary order, so both are sorted first.
    pub fn state_digest(&self) -> Hash {
        let mut ids: Vec<&Hash> = self.verified.iter().collect();
        ids.sort();

        let mut edges: Vec<(&Hash, &TransitionEdge)> = self.edges.iter().collect();
        edges.sort_by(|a, b| a.0.cmp(b.0));

        let mut hasher = CanonicalHasher::new(LEDGER_DOMAIN);
        hasher.write_len(ids.len());
        for id in ids {
            hasher.write_hash(id);
        }
        hasher.write_len(edges.len());
        for (pre, edge) in edges {
            hasher
                .write_hash(pre)
                .write_hash(&edge.post_state_root)
                .write_hash(&edge.commitment_id);
        }
        hasher.finalize()
    }
}
