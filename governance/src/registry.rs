//! Call registry — id assignment and lifecycle bookkeeping.
//!
//! Three disjoint buckets hold every record ever created:
//! - **pending**: prepared calls awaiting execution or cancellation. Removal
//!   keeps the remaining entries in preparation order.
//! - **executed** / **cancelled**: append-only history.

use govlock_types::{CallPayload, ContractAddress, Timestamp};
use indexmap::IndexMap;

use crate::error::TimelockError;
use crate::record::{CallId, CallRecord, CallStatus};

#[derive(Clone, Debug, Default)]
pub struct CallRegistry {
    pending: IndexMap<CallId, CallRecord>,
    executed: Vec<CallRecord>,
    cancelled: Vec<CallRecord>,
    /// Records ever created; also the next id.
    total_calls: u64,
}

impl CallRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a registry from previously persisted buckets.
    pub fn from_parts(
        pending: Vec<CallRecord>,
        executed: Vec<CallRecord>,
        cancelled: Vec<CallRecord>,
        total_calls: u64,
    ) -> Result<Self, TimelockError> {
        let mut seen = std::collections::HashSet::new();
        for record in pending.iter().chain(&executed).chain(&cancelled) {
            if !record.is_consistent() {
                return Err(TimelockError::CorruptState(format!(
                    "call {} selector does not match its payload",
                    record.id()
                )));
            }
            if record.id() >= total_calls {
                return Err(TimelockError::CorruptState(format!(
                    "call {} is not below total_calls {}",
                    record.id(),
                    total_calls
                )));
            }
            if !seen.insert(record.id()) {
                return Err(TimelockError::CorruptState(format!(
                    "call {} appears twice",
                    record.id()
                )));
            }
        }
        let count = pending.len() + executed.len() + cancelled.len();
        if count as u64 != total_calls {
            return Err(TimelockError::CorruptState(format!(
                "{count} records stored but total_calls is {total_calls}"
            )));
        }
        let mut pending_map: IndexMap<CallId, CallRecord> = IndexMap::with_capacity(pending.len());
        for record in pending {
            if pending_map
                .values()
                .any(|r| r.matches(&record.target(), record.payload()))
            {
                return Err(TimelockError::CorruptState(format!(
                    "call {} duplicates a pending call to {}",
                    record.id(),
                    record.target()
                )));
            }
            pending_map.insert(record.id(), record);
        }
        Ok(Self {
            pending: pending_map,
            executed,
            cancelled,
            total_calls,
        })
    }

    /// Fails with `DuplicatePending` if `target` already has a pending call
    /// with byte-identical `payload`.
    pub fn ensure_not_pending(&self, target: &ContractAddress, payload: &CallPayload) -> Result<(), TimelockError> {
        if self.pending.values().any(|r| r.matches(target, payload)) {
            return Err(TimelockError::DuplicatePending);
        }
        Ok(())
    }

    /// Create a pending record and return its id.
    pub fn insert_pending(
        &mut self,
        target: ContractAddress,
        payload: CallPayload,
        now: Timestamp,
    ) -> Result<CallId, TimelockError> {
        self.ensure_not_pending(&target, &payload)?;
        let id = self.total_calls;
        self.pending.insert(id, CallRecord::new(id, now, target, payload));
        self.total_calls += 1;
        Ok(id)
    }

    /// Remove a pending record, leaving the rest in order.
    pub fn remove_pending(&mut self, id: CallId) -> Result<CallRecord, TimelockError> {
        self.pending
            .shift_remove(&id)
            .ok_or(TimelockError::NotFound(id))
    }

    pub fn move_to_executed(&mut self, record: CallRecord) {
        self.executed.push(record);
    }

    pub fn move_to_cancelled(&mut self, record: CallRecord) {
        self.cancelled.push(record);
    }

    pub fn get_pending(&self, id: CallId) -> Option<&CallRecord> {
        self.pending.get(&id)
    }

    pub fn status(&self, id: CallId) -> Option<CallStatus> {
        if self.pending.contains_key(&id) {
            Some(CallStatus::Pending)
        } else if self.executed.iter().any(|r| r.id() == id) {
            Some(CallStatus::Executed)
        } else if self.cancelled.iter().any(|r| r.id() == id) {
            Some(CallStatus::Cancelled)
        } else {
            None
        }
    }

    pub fn list_pending(&self) -> impl Iterator<Item = &CallRecord> + '_ {
        self.pending.values()
    }

    pub fn list_executed(&self) -> impl Iterator<Item = &CallRecord> + '_ {
        self.executed.iter()
    }

    pub fn list_cancelled(&self) -> impl Iterator<Item = &CallRecord> + '_ {
        self.cancelled.iter()
    }

    /// Record at position `index` of the current pending order.
    ///
    /// Positions shift whenever an earlier pending call is removed; use the
    /// call id to refer to a call durably.
    pub fn pending_at_index(&self, index: usize) -> Option<&CallRecord> {
        self.pending.get_index(index).map(|(_, r)| r)
    }

    /// Id at position `index` of the current pending order.
    pub fn pending_id_at_index(&self, index: usize) -> Option<CallId> {
        self.pending.get_index(index).map(|(&id, _)| id)
    }

    /// Current position of a pending call.
    pub fn pending_index_of(&self, id: CallId) -> Option<usize> {
        self.pending.get_index_of(&id)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn total_calls(&self) -> u64 {
        self.total_calls
    }
}
