//! Per-operation status board.
//!
//! Each key carries its own sequence counter. Only the most recently issued
//! ticket for a key may record a completion, so an older call finishing late
//! can never overwrite a newer one.

use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationKind {
    Summarize,
    DraftExperienceBullets,
    SuggestSkills,
    OptimizeResume,
    AnalyzeMatch,
    DraftCoverLetter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationKey {
    pub kind: OperationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<Uuid>,
}

impl OperationKey {
    pub fn of(kind: OperationKind) -> Self {
        Self {
            kind,
            entry_id: None,
        }
    }

    pub fn bullets_for(entry_id: Uuid) -> Self {
        Self {
            kind: OperationKind::DraftExperienceBullets,
            entry_id: Some(entry_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum OperationStatus {
    Pending,
    Succeeded,
    Failed { reason: String },
}

/// Proof that a call was issued. Compared against the board on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub key: OperationKey,
    seq: u64,
}

#[derive(Debug, Clone)]
struct Slot {
    seq: u64,
    status: OperationStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEntry {
    #[serde(flatten)]
    pub key: OperationKey,
    pub status: OperationStatus,
}

#[derive(Debug, Default)]
pub struct OperationBoard {
    slots: HashMap<OperationKey, Slot>,
}

impl OperationBoard {
    /// Issues a new ticket for `key` and marks it pending. Any ticket issued
    /// earlier for the same key becomes stale.
    pub fn begin(&mut self, key: OperationKey) -> Ticket {
        let slot = self.slots.entry(key).or_insert(Slot {
            seq: 0,
            status: OperationStatus::Pending,
        });
        slot.seq += 1;
        slot.status = OperationStatus::Pending;
        Ticket { key, seq: slot.seq }
    }

    pub fn is_latest(&self, ticket: &Ticket) -> bool {
        self.slots
            .get(&ticket.key)
            .is_some_and(|slot| slot.seq == ticket.seq)
    }

    /// Records the outcome of `ticket`. Returns false, changing nothing, when
    /// the ticket is stale.
    pub fn finish(&mut self, ticket: &Ticket, status: OperationStatus) -> bool {
        match self.slots.get_mut(&ticket.key) {
            Some(slot) if slot.seq == ticket.seq => {
                slot.status = status;
                true
            }
            _ => false,
        }
    }

    /// Drops settled slots keyed to `entry_id`. A pending slot stays so the
    /// in-flight call can still report that its entry is gone.
    pub fn forget_entry(&mut self, entry_id: Uuid) {
        self.slots.retain(|key, slot| {
            key.entry_id != Some(entry_id) || slot.status == OperationStatus::Pending
        });
    }

    /// `None` means the key was never used.
    #[cfg(test)]
    pub fn status(&self, key: &OperationKey) -> Option<&OperationStatus> {
        self.slots.get(key).map(|slot| &slot.status)
    }

    pub fn entries(&self) -> Vec<StatusEntry> {
        let mut entries: Vec<StatusEntry> = self
            .slots
            .iter()
            .map(|(key, slot)| StatusEntry {
                key: *key,
                status: slot.status.clone(),
            })
            .collect();
        entries.sort_by_key(|e| (e.key.kind as u8, e.key.entry_id));
        entries
    }
}
