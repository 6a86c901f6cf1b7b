// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Verification Ledger
//!
//! Accepts (seal, journal) pairs gated by a [`ProofOracle`], guarantees each
//! commitment id is accepted at most once, and maintains the pre -> post
//! state-transition graph.
//!
//! # Per-item steps
//! 1. Length check and positional decode of the journal
//! 2. Oracle check against the configured program id
//! 3. Replay guard (live state plus items already staged in this call)
//! 4. Edge policy
//! 5. Stage
//!
//! # Commit boundary
//! Every state-changing call first builds a [`PreparedCommit`] in a shadow
//! overlay and then applies it in one step. A call that fails at any item
//! leaves the ledger exactly as it was. Durable callers can persist the
//! prepared events between [`VerificationLedger::prepare`] and
//! [`VerificationLedger::commit`].

pub mod event;
pub mod journal;
pub mod shadow;
pub mod state;

pub use event::LedgerEvent;
pub use journal::EventJournal;
pub use shadow::{PreparedCommit, Transition};
pub use state::{LedgerState, TransitionEdge};

use crate::commitment::{decode_journal, ExecutionCommitment};
use crate::config::LedgerConfig;
use crate::error::{LedgerError, LedgerResult};
use crate::oracle::{journal_digest, ProofOracle};
use crate::types::{Address, Hash, Version};
use shadow::{check_edge, ShadowLedger};

pub struct VerificationLedger<O> {
    oracle: O,
    config: LedgerConfig,
    state: LedgerState,
    journal: EventJournal,
}

impl<O: ProofOracle> VerificationLedger<O> {
    pub fn new(oracle: O, config: LedgerConfig) -> Self {
        Self {
            oracle,
            config,
            state: LedgerState::new(),
            journal: EventJournal::new(),
        }
    }

    /// Rebuilds a ledger from a committed event history.
    ///
    /// The oracle is not consulted: every event in `events` was emitted by a
    /// ledger that already checked the proof. The history must consist of
    /// matching `ExecutionVerified` / `StateTransitionRecorded` pairs.
    pub fn restore(oracle: O, config: LedgerConfig, events: Vec<LedgerEvent>) -> LedgerResult<Self> {
        let mut state = LedgerState::new();

        let mut pairs = events.chunks_exact(2);
        for (index, pair) in pairs.by_ref().enumerate() {
            let (id, pre, post) = match pair {
                [LedgerEvent::ExecutionVerified {
                    commitment_id,
                    pre_state_root,
                    post_state_root,
                    ..
                }, LedgerEvent::StateTransitionRecorded {
                    pre_state_root: recorded_pre,
                    post_state_root: recorded_post,
                    commitment_id: recorded_id,
                }] if recorded_id == commitment_id
                    && recorded_pre == pre_state_root
                    && recorded_post == post_state_root =>
                {
                    (*commitment_id, *pre_state_root, *post_state_root)
                }
                _ => {
                    return Err(LedgerError::CorruptHistory(format!(
                        "events {} and {} do not form an acceptance",
                        index * 2,
                        index * 2 + 1
                    )))
                }
            };

            if state.is_verified(&id) {
                return Err(LedgerError::CorruptHistory(format!("commitment {id} accepted twice")));
            }
            check_edge(
                config.edge_policy,
                &pre,
                state.edge(&pre).map(|e| e.post_state_root),
                &post,
            )
            .map_err(|e| LedgerError::CorruptHistory(e.to_string()))?;

            state.record(id, pre, post);
        }

        if !pairs.remainder().is_empty() {
            return Err(LedgerError::CorruptHistory(format!(
                "dangling event at index {}",
                events.len() - 1
            )));
        }

        Ok(Self {
            oracle,
            config,
            state,
            journal: EventJournal::from_committed(events),
        })
    }

    /// Verifies one submission and commits it.
    pub fn verify(&mut self, submitter: Address, seal: &[u8], journal: &[u8]) -> LedgerResult<ExecutionCommitment> {
        let mut shadow = ShadowLedger::new(&self.state, self.config.edge_policy);
        let commitment = self.stage_item(&mut shadow, submitter, seal, journal)?;
        let prepared = shadow.into_prepared();
        self.commit(prepared)?;
        Ok(commitment)
    }

    /// Verifies every pair in order. All or nothing.
    pub fn batch_verify<S, J>(
        &mut self,
        submitter: Address,
        seals: &[S],
        journals: &[J],
    ) -> LedgerResult<Vec<ExecutionCommitment>>
    where
        S: AsRef<[u8]>,
        J: AsRef<[u8]>,
    {
        let prepared = self.prepare_batch(submitter, seals, journals)?;
        self.commit(prepared)
    }

    /// Validates one submission without applying it.
    pub fn prepare(&self, submitter: Address, seal: &[u8], journal: &[u8]) -> LedgerResult<PreparedCommit> {
        let mut shadow = ShadowLedger::new(&self.state, self.config.edge_policy);
        self.stage_item(&mut shadow, submitter, seal, journal)?;
        Ok(shadow.into_prepared())
    }

    /// Validates a batch without applying it. A length mismatch is rejected
    /// before any item is looked at.
    pub fn prepare_batch<S, J>(&self, submitter: Address, seals: &[S], journals: &[J]) -> LedgerResult<PreparedCommit>
    where
        S: AsRef<[u8]>,
        J: AsRef<[u8]>,
    {
        if seals.len() != journals.len() {
            return Err(LedgerError::BatchLengthMismatch {
                seals: seals.len(),
                journals: journals.len(),
            });
        }

        let mut shadow = ShadowLedger::new(&self.state, self.config.edge_policy);
        for (seal, journal) in seals.iter().zip(journals) {
            self.stage_item(&mut shadow, submitter, seal.as_ref(), journal.as_ref())?;
        }
        Ok(shadow.into_prepared())
    }

    /// Applies a prepared call. The only place ledger state changes.
    pub fn commit(&mut self, prepared: PreparedCommit) -> LedgerResult<Vec<ExecutionCommitment>> {
        let current = self.state.height();
        if prepared.base_height() != current {
            return Err(LedgerError::StalePreparation {
                prepared_at: prepared.base_height().0,
                current: current.0,
            });
        }

        for transition in prepared.transitions() {
            let c = &transition.commitment;
            self.state.record(c.commitment_id, c.pre_state_root, c.post_state_root);
        }
        self.journal.append_commit(prepared.events());

        Ok(prepared.commitments())
    }

    fn stage_item(
        &self,
        shadow: &mut ShadowLedger<'_>,
        submitter: Address,
        seal: &[u8],
        journal: &[u8],
    ) -> LedgerResult<ExecutionCommitment> {
        let commitment = decode_journal(journal)?;

        if !self
            .oracle
            .verify(seal, &self.config.program_id, &journal_digest(journal))
        {
            return Err(LedgerError::ProofRejected);
        }

        shadow.stage(commitment, submitter)?;
        Ok(commitment)
    }

    pub fn is_verified(&self, commitment_id: &Hash) -> bool {
        self.state.is_verified(commitment_id)
    }

    /// `None` when no edge leaves `pre_state_root`.
    pub fn post_state_root_of(&self, pre_state_root: &Hash) -> Option<Hash> {
        self.state.edge(pre_state_root).map(|e| e.post_state_root)
    }

    pub fn transition_of(&self, pre_state_root: &Hash) -> Option<TransitionEdge> {
        self.state.edge(pre_state_root).copied()
    }

    /// True iff every adjacent pair in `roots` is a recorded edge. Sequences
    /// shorter than two are trivially linked.
    pub fn verify_chain(&self, roots: &[Hash]) -> bool {
        roots
            .windows(2)
            .all(|pair| self.post_state_root_of(&pair[0]) == Some(pair[1]))
    }

    pub fn events(&self) -> &[LedgerEvent] {
        self.journal.committed()
    }

    pub fn height(&self) -> Version {
        self.state.height()
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn state_digest(&self) -> Hash {
        self.state.state_digest()
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }
}
