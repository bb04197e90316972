//! The call timelock — prepare, validate, execute and cancel governed calls.
//!
//! Lifecycle of a call: `Pending → Executed` or `Pending → Cancelled`.
//! A call becomes executable once its delay has elapsed since preparation;
//! execution is then open to anyone. Every operation checks all of its
//! preconditions before mutating anything, so a failed operation leaves the
//! timelock untouched.
//!
//! Calls addressed to the timelock itself are dispatched internally with a
//! self-dispatched [`Origin`]. This is the only way to reach
//! [`CallTimelock::update_delay`] successfully.

use govlock_types::{CallPayload, ContractAddress, Selector, Timestamp};
use tracing::{debug, info, warn};

use crate::calls::TimelockCall;
use crate::delay::DelayTable;
use crate::error::TimelockError;
use crate::events::TimelockEvent;
use crate::host::{Authority, CallTarget, Clock, InvokeError};
use crate::origin::Origin;
use crate::record::{CallId, CallRecord, CallStatus};
use crate::registry::CallRegistry;
use crate::state::TimelockState;

pub struct CallTimelock<A, C, T> {
    /// The timelock's own address; calls to it are dispatched internally.
    address: ContractAddress,
    authority: A,
    clock: C,
    targets: T,
    delays: DelayTable,
    registry: CallRegistry,
    events: Vec<TimelockEvent>,
}

impl<A: Authority, C: Clock, T: CallTarget> CallTimelock<A, C, T> {
    pub fn new(address: ContractAddress, authority: A, clock: C, targets: T) -> Self {
        Self {
            address,
            authority,
            clock,
            targets,
            delays: DelayTable::new(),
            registry: CallRegistry::new(),
            events: Vec::new(),
        }
    }

    /// Rebuild a timelock from a persisted snapshot.
    pub fn restore(
        address: ContractAddress,
        authority: A,
        clock: C,
        targets: T,
        state: TimelockState,
    ) -> Result<Self, TimelockError> {
        let registry = CallRegistry::from_parts(state.pending, state.executed, state.cancelled, state.total_calls)?;
        Ok(Self {
            address,
            authority,
            clock,
            targets,
            delays: state.delays.into_iter().collect(),
            registry,
            events: Vec::new(),
        })
    }

    pub fn snapshot(&self) -> TimelockState {
        TimelockState {
            delays: self.delays.entries().collect(),
            pending: self.registry.list_pending().cloned().collect(),
            executed: self.registry.list_executed().cloned().collect(),
            cancelled: self.registry.list_cancelled().cloned().collect(),
            total_calls: self.registry.total_calls(),
        }
    }

    // ── Call lifecycle ──────────────────────────────────────────────────

    /// Queue a call to `target`. With `validate`, the call is first run
    /// speculatively and preparation fails if it would revert.
    pub fn prepare_call(
        &mut self,
        origin: &Origin,
        target: ContractAddress,
        payload: CallPayload,
        validate: bool,
    ) -> Result<CallId, TimelockError> {
        self.only_owner(origin)?;
        if target.is_zero() {
            return Err(TimelockError::ZeroAddress);
        }
        self.registry.ensure_not_pending(&target, &payload)?;
        if validate {
            self.simulate(&target, &payload).map_err(|e| {
                debug!(%target, selector = %payload.selector(), reason = %e, "validation rejected call");
                TimelockError::WouldRevert(e.to_string())
            })?;
        }

        let now = self.clock.now();
        let delay = self.effective_delay(&target, &payload);
        let selector = payload.selector();
        let id = self.registry.insert_pending(target, payload, now)?;
        let ready_at = now.saturating_add(delay);
        info!(id, %target, %selector, delay, %ready_at, validated = validate, "call prepared");
        self.events.push(TimelockEvent::CallPrepared {
            id,
            target,
            selector,
            ready_at,
        });
        Ok(id)
    }

    /// Execute a pending call whose delay has elapsed. Open to any caller.
    ///
    /// A call whose target fails stays pending and may be retried.
    pub fn execute_call(&mut self, origin: &Origin, id: CallId) -> Result<(), TimelockError> {
        let record = self.registry.get_pending(id).ok_or(TimelockError::NotFound(id))?;
        let ready_at = self.ready_at(record);
        if self.clock.now() < ready_at {
            return Err(TimelockError::NotReady { ready_at });
        }
        let target = record.target();
        let payload = record.payload().clone();

        if let Err(e) = self.invoke(&target, &payload) {
            warn!(id, %target, caller = %origin, reason = %e, "call execution failed");
            return Err(TimelockError::ExecutionFailed(e.to_string()));
        }

        let record = self.registry.remove_pending(id)?;
        let selector = record.selector();
        self.registry.move_to_executed(record);
        info!(id, %target, %selector, caller = %origin, "call executed");
        self.events.push(TimelockEvent::CallExecuted { id, target, selector });
        Ok(())
    }

    /// Execute a delay-free call immediately, without recording it.
    pub fn quick_execute_call(
        &mut self,
        origin: &Origin,
        target: ContractAddress,
        payload: CallPayload,
    ) -> Result<(), TimelockError> {
        self.only_owner(origin)?;
        if target.is_zero() {
            return Err(TimelockError::ZeroAddress);
        }
        self.registry.ensure_not_pending(&target, &payload)?;
        if self.effective_delay(&target, &payload) != 0 {
            return Err(TimelockError::HasDelay);
        }

        self.invoke(&target, &payload)
            .map_err(|e| TimelockError::ExecutionFailed(e.to_string()))?;
        let selector = payload.selector();
        info!(%target, %selector, "call quick-executed");
        self.events.push(TimelockEvent::QuickExecuted { target, selector });
        Ok(())
    }

    /// Cancel a pending call, ready or not.
    pub fn cancel_call(&mut self, origin: &Origin, id: CallId) -> Result<(), TimelockError> {
        self.only_owner(origin)?;
        let record = self.registry.remove_pending(id)?;
        info!(id, target = %record.target(), "call cancelled");
        self.registry.move_to_cancelled(record);
        self.events.push(TimelockEvent::CallCancelled { id });
        Ok(())
    }

    /// Execute every call that is ready right now, in pending order.
    ///
    /// A failing call stays pending and does not stop the sweep.
    pub fn execute_ready_calls(&mut self, origin: &Origin) -> Vec<(CallId, Result<(), TimelockError>)> {
        let ready: Vec<CallId> = self.ready_calls().map(|r| r.id()).collect();
        ready
            .into_iter()
            .map(|id| (id, self.execute_call(origin, id)))
            .collect()
    }

    // ── Delay administration ────────────────────────────────────────────

    /// Configure the initial delay of `(target, selector)`. Owner only;
    /// succeeds once per key.
    pub fn set_delay(
        &mut self,
        origin: &Origin,
        target: ContractAddress,
        selector: Selector,
        delay_secs: u64,
    ) -> Result<(), TimelockError> {
        self.only_owner(origin)?;
        self.delays.set(target, selector, delay_secs)?;
        info!(%target, %selector, delay_secs, "delay set");
        self.events.push(TimelockEvent::DelaySet {
            target,
            selector,
            delay_secs,
        });
        Ok(())
    }

    /// Change an existing delay. Only reachable through a call the timelock
    /// executes on itself.
    pub fn update_delay(
        &mut self,
        origin: &Origin,
        target: ContractAddress,
        selector: Selector,
        delay_secs: u64,
    ) -> Result<(), TimelockError> {
        if !origin.is_self_dispatched() {
            return Err(TimelockError::MustBeCalledViaTimelock);
        }
        let old_delay_secs = self.delays.get(&target, &selector);
        self.delays.update(target, selector, delay_secs)?;
        info!(%target, %selector, old_delay_secs, delay_secs, "delay updated");
        self.events.push(TimelockEvent::DelayUpdated {
            target,
            selector,
            old_delay_secs,
            new_delay_secs: delay_secs,
        });
        Ok(())
    }

    /// Internal hook used to exercise self-call gating. Does nothing when
    /// dispatched by the timelock itself.
    pub fn test_call(&self, origin: &Origin, record: &CallRecord) -> Result<(), TimelockError> {
        if !origin.is_self_dispatched() {
            return Err(TimelockError::OnlyCallableBySelf);
        }
        debug!(id = record.id(), "test call dispatched");
        Ok(())
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn address(&self) -> ContractAddress {
        self.address
    }

    pub fn get_delay(&self, target: &ContractAddress, selector: &Selector) -> u64 {
        self.delays.get(target, selector)
    }

    pub fn delays(&self) -> &DelayTable {
        &self.delays
    }

    pub fn total_calls(&self) -> u64 {
        self.registry.total_calls()
    }

    pub fn pending_calls(&self) -> impl Iterator<Item = &CallRecord> + '_ {
        self.registry.list_pending()
    }

    pub fn executed_calls(&self) -> impl Iterator<Item = &CallRecord> + '_ {
        self.registry.list_executed()
    }

    pub fn cancelled_calls(&self) -> impl Iterator<Item = &CallRecord> + '_ {
        self.registry.list_cancelled()
    }

    /// Pending call at position `index` of the current pending order.
    pub fn pending_call(&self, index: usize) -> Option<&CallRecord> {
        self.registry.pending_at_index(index)
    }

    /// Id of the pending call at position `index`.
    pub fn pending_call_id(&self, index: usize) -> Option<CallId> {
        self.registry.pending_id_at_index(index)
    }

    /// Current position of a pending call; shifts as earlier calls leave.
    pub fn pending_call_index(&self, id: CallId) -> Result<usize, TimelockError> {
        self.registry.pending_index_of(id).ok_or(TimelockError::NotFound(id))
    }

    pub fn call_status(&self, id: CallId) -> Option<CallStatus> {
        self.registry.status(id)
    }

    /// Seconds a pending call must wait after preparation.
    pub fn pending_call_delay(&self, id: CallId) -> Result<u64, TimelockError> {
        let record = self.registry.get_pending(id).ok_or(TimelockError::NotFound(id))?;
        Ok(self.effective_delay(&record.target(), record.payload()))
    }

    /// Pending calls whose delay has elapsed.
    pub fn ready_calls(&self) -> impl Iterator<Item = &CallRecord> + '_ {
        let now = self.clock.now();
        self.registry
            .list_pending()
            .filter(move |r| self.ready_at(r) <= now)
    }

    /// Pending calls still waiting on their delay.
    pub fn not_ready_calls(&self) -> impl Iterator<Item = &CallRecord> + '_ {
        let now = self.clock.now();
        self.registry
            .list_pending()
            .filter(move |r| self.ready_at(r) > now)
    }

    /// Drain the events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<TimelockEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn authority(&self) -> &A {
        &self.authority
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn targets(&self) -> &T {
        &self.targets
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn only_owner(&self, origin: &Origin) -> Result<(), TimelockError> {
        match origin.caller() {
            Some(caller) if self.authority.is_owner(&caller) => Ok(()),
            _ => Err(TimelockError::Unauthorized),
        }
    }

    fn ready_at(&self, record: &CallRecord) -> Timestamp {
        record
            .created_at()
            .saturating_add(self.effective_delay(&record.target(), record.payload()))
    }

    /// Delay that applies to a call.
    ///
    /// A self-call changing a delay waits at least as long as the delay it
    /// changes, so no protection can be loosened faster than it applies.
    fn effective_delay(&self, target: &ContractAddress, payload: &CallPayload) -> u64 {
        let own = self.delays.get(target, &payload.selector());
        if *target != self.address {
            return own;
        }
        match TimelockCall::decode(payload) {
            Ok(Some(TimelockCall::UpdateDelay {
                target: updated,
                selector,
                ..
            })) => own.max(self.delays.get(&updated, &selector)),
            _ => own,
        }
    }

    fn invoke(&mut self, target: &ContractAddress, payload: &CallPayload) -> Result<Vec<u8>, InvokeError> {
        if *target == self.address {
            return self.dispatch_self(payload);
        }
        self.targets.invoke(target, payload)
    }

    fn simulate(&self, target: &ContractAddress, payload: &CallPayload) -> Result<Vec<u8>, InvokeError> {
        if *target == self.address {
            return self.simulate_self(payload);
        }
        self.targets.simulate(target, payload)
    }

    /// Run a payload addressed to the timelock with a self-dispatched origin.
    ///
    /// Only `updateDelay` and `testCall` are honoured; the remaining entry
    /// points are owner-only and the timelock is never its own owner.
    fn dispatch_self(&mut self, payload: &CallPayload) -> Result<Vec<u8>, InvokeError> {
        let origin = Origin::timelock();
        let result = match decode_self_call(payload)? {
            TimelockCall::UpdateDelay {
                target,
                selector,
                delay_secs,
            } => self.update_delay(&origin, target, selector, delay_secs),
            TimelockCall::TestCall { record } => self.test_call(&origin, &record),
            _ => Err(TimelockError::Unauthorized),
        };
        result.map(|()| Vec::new()).map_err(reverted)
    }

    /// Dry run of [`Self::dispatch_self`] against current state.
    fn simulate_self(&self, payload: &CallPayload) -> Result<Vec<u8>, InvokeError> {
        let origin = Origin::timelock();
        let result = match decode_self_call(payload)? {
            TimelockCall::UpdateDelay { target, selector, .. } => self.delays.check_update(&target, &selector),
            TimelockCall::TestCall { record } => self.test_call(&origin, &record),
            _ => Err(TimelockError::Unauthorized),
        };
        result.map(|()| Vec::new()).map_err(reverted)
    }
}

fn decode_self_call(payload: &CallPayload) -> Result<TimelockCall, InvokeError> {
    match TimelockCall::decode(payload) {
        Ok(Some(call)) => Ok(call),
        Ok(None) | Err(_) => Err(InvokeError::UnknownFunction),
    }
}

fn reverted(err: TimelockError) -> InvokeError {
    InvokeError::Reverted(err.to_string())
}
