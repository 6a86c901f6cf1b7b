// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Event Journal
//!
//! Append-only, in-memory record of every committed ledger event. Events
//! only enter through a commit, one whole call at a time, so the journal
//! never holds a partial batch.

use crate::ledger::event::LedgerEvent;

#[derive(Clone, Debug, Default)]
pub struct EventJournal {
    committed: Vec<LedgerEvent>,
}

impl EventJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Journal for a history recovered from elsewhere.
    pub fn from_committed(events: Vec<LedgerEvent>) -> Self {
        Self { committed: events }
    }

    pub fn append_commit(&mut self, events: impl IntoIterator<Item = LedgerEvent>) {
        self.committed.extend(events);
    }

    pub fn committed(&self) -> &[LedgerEvent] {
        &self.committed
    }

    pub fn len(&self) -> usize {
        self.committed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Hash;

    fn recorded(byte: u8) -> LedgerEvent {
        LedgerEvent::StateTransitionRecorded {
            pre_state_root: Hash::repeat_byte(byte),
            post_state_root: Hash::repeat_byte(byte + 1),
            commitment_id: Hash::repeat_byte(byte + 2),
        }
    }

    #[test]
    fn test_journal_append_commit() {
        let mut journal = EventJournal::new();
        journal.append_commit(vec![recorded(1), recorded(4)]);
        journal.append_commit(vec![recorded(7)]);

        assert_eq!(journal.len(), 3);
        assert_eq!(journal.committed()[2], recorded(7));
    }

    #[test]
    fn test_journal_from_committed() {
        let journal = EventJournal::from_committed(vec![recorded(1), recorded(2)]);
        assert_eq!(journal.len(), 2);
        assert!(EventJournal::from_committed(Vec::new()).is_empty());
    }
}
