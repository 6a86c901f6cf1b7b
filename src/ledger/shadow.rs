// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Shadow staging.
//!
//! A `ShadowLedger` overlays pending acceptances on top of the live state
//! without touching it. Checks run against live plus staged entries, so a
//! batch sees its own earlier items. Dropping the shadow discards everything;
//! only `VerificationLedger::commit` promotes a `PreparedCommit` to truth.

use crate::commitment::ExecutionCommitment;
use crate::config::EdgePolicy;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::event::LedgerEvent;
use crate::ledger::state::LedgerState;
use crate::types::{Address, Hash, Version};
use rustc_hash::{FxHashMap, FxHashSet};

/// One staged acceptance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub commitment: ExecutionCommitment,
    pub submitter: Address,
}

impl Transition {
    pub fn events(&self) -> [LedgerEvent; 2] {
        let c = &self.commitment;
        [
            LedgerEvent::ExecutionVerified {
                commitment_id: c.commitment_id,
                pre_state_root: c.pre_state_root,
                post_state_root: c.post_state_root,
                submitter: self.submitter,
            },
            LedgerEvent::StateTransitionRecorded {
                pre_state_root: c.pre_state_root,
                post_state_root: c.post_state_root,
                commitment_id: c.commitment_id,
            },
        ]
    }
}

/// Fully validated effects of one call, not yet applied.
///
/// Only valid against the ledger height it was prepared at.
#[derive(Debug, PartialEq, Eq)]
pub struct PreparedCommit {
    base_height: Version,
    transitions: Vec<Transition>,
}

impl PreparedCommit {
    pub fn base_height(&self) -> Version {
        self.base_height
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn commitments(&self) -> Vec<ExecutionCommitment> {
        self.transitions.iter().map(|t| t.commitment).collect()
    }

    /// Events this commit will emit, in order.
    pub fn events(&self) -> Vec<LedgerEvent> {
        self.transitions.iter().flat_map(|t| t.events()).collect()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

/// Applies `policy` to an edge that may already exist for `pre_state_root`.
pub(crate) fn check_edge(
    policy: EdgePolicy,
    pre_state_root: &Hash,
    recorded: Option<Hash>,
    attempted: &Hash,
) -> LedgerResult<()> {
    match (policy, recorded) {
        (EdgePolicy::RejectConflict, Some(recorded)) if recorded != *attempted => {
            Err(LedgerError::StateRootCollision {
                pre_state_root: *pre_state_root,
                recorded,
                attempted: *attempted,
            })
        }
        _ => Ok(()),
    }
}

pub(crate) struct ShadowLedger<'a> {
    live: &'a LedgerState,
    policy: EdgePolicy,
    staged_ids: FxHashSet<Hash>,
    staged_edges: FxHashMap<Hash, Hash>,
    transitions: Vec<Transition>,
}

impl<'a> ShadowLedger<'a> {
    pub(crate) fn new(live: &'a LedgerState, policy: EdgePolicy) -> Self {
        Self {
            live,
            policy,
            staged_ids: FxHashSet::default(),
            staged_edges: FxHashMap::default(),
            transitions: Vec::new(),
        }
    }

    fn is_verified(&self, commitment_id: &Hash) -> bool {
        self.staged_ids.contains(commitment_id) || self.live.is_verified(commitment_id)
    }

    fn post_state_root_of(&self, pre_state_root: &Hash) -> Option<Hash> {
        self.staged_edges
            .get(pre_state_root)
            .copied()
            .or_else(|| self.live.edge(pre_state_root).map(|e| e.post_state_root))
    }

    /// Replay guard, then edge policy, then stage.
    pub(crate) fn stage(&mut self, commitment: ExecutionCommitment, submitter: Address) -> LedgerResult<()> {
        if self.is_verified(&commitment.commitment_id) {
            return Err(LedgerError::Replay(commitment.commitment_id));
        }

        check_edge(
            self.policy,
            &commitment.pre_state_root,
            self.post_state_root_of(&commitment.pre_state_root),
            &commitment.post_state_root,
        )?;

        self.staged_ids.insert(commitment.commitment_id);
        self.staged_edges
            .insert(commitment.pre_state_root, commitment.post_state_root);
        self.transitions.push(Transition {
            commitment,
            submitter,
        });
        Ok(())
    }

    pub(crate) fn into_prepared(self) -> PreparedCommit {
        PreparedCommit {
            base_height: self.live.height(),
            transitions: self.transitions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commitment(seed: u8, pre: u8, post: u8) -> ExecutionCommitment {
        ExecutionCommitment::new(
            Hash::repeat_byte(seed),
            Hash::repeat_byte(seed),
            Hash::repeat_byte(pre),
            Hash::repeat_byte(post),
        )
    }

    #[test]
    fn test_shadow_leaves_live_untouched() {
        let live = LedgerState::new();
        let mut shadow = ShadowLedger::new(&live, EdgePolicy::Overwrite);
        shadow.stage(commitment(1, 10, 11), Address::ZERO).unwrap();

        let prepared = shadow.into_prepared();
        assert_eq!(prepared.len(), 1);
        assert_eq!(prepared.events().len(), 2);
        assert_eq!(live.verified_count(), 0);
    }

    #[test]
    fn test_staged_items_guard_later_items() {
        let live = LedgerState::new();
        let mut shadow = ShadowLedger::new(&live, EdgePolicy::RejectConflict);
        let c = commitment(1, 10, 11);
        shadow.stage(c, Address::ZERO).unwrap();

        assert_eq!(shadow.stage(c, Address::ZERO), Err(LedgerError::Replay(c.commitment_id)));
        assert!(matches!(
            shadow.stage(commitment(2, 10, 12), Address::ZERO),
            Err(LedgerError::StateRootCollision { .. })
        ));
        // Same post root under a new id is not a conflict.
        shadow.stage(commitment(3, 10, 11), Address::ZERO).unwrap();
    }
}
