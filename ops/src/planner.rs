//! Reconcile the timelock's delay table with the governable functions file.
//!
//! For every deployed address of every listed function the planner compares
//! the configured delay with the desired one:
//! - equal: nothing to do;
//! - no delay configured yet: the owner sets it directly;
//! - otherwise: an `updateDelay` self-call is prepared, which itself waits
//!   out the delay it replaces.

use govlock_governance::{
    update_delay_payload, Authority, CallId, CallTarget, CallTimelock, Clock, DelayTable, Origin, TimelockError,
};
use govlock_types::{CallPayload, ContractAddress, Selector};
use govlock_utils::format_delay;
use tracing::{info, warn};

use crate::{Deployments, GovernableFunctions, OpsError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DelayAction {
    Unchanged,
    Set,
    /// Submit `payload` to the timelock itself with validation on.
    PrepareUpdate { payload: CallPayload },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedDelay {
    pub contract: String,
    pub signature: String,
    pub target: ContractAddress,
    pub selector: Selector,
    pub current_secs: u64,
    pub desired_secs: u64,
    pub action: DelayAction,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DelayPlan {
    pub entries: Vec<PlannedDelay>,
    /// Contracts named in the functions file but absent from the deployments.
    pub missing_contracts: Vec<String>,
}

impl DelayPlan {
    /// Entries that require a transaction.
    pub fn changes(&self) -> impl Iterator<Item = &PlannedDelay> + '_ {
        self.entries
            .iter()
            .filter(|e| e.action != DelayAction::Unchanged)
    }
}

pub fn plan_delays(
    functions: &GovernableFunctions,
    deployments: &Deployments,
    delays: &DelayTable,
) -> Result<DelayPlan, OpsError> {
    let mut plan = DelayPlan::default();
    for function in functions.iter() {
        let Some(addresses) = deployments.addresses(&function.contract) else {
            if !plan.missing_contracts.contains(&function.contract) {
                warn!(contract = %function.contract, "contract has no deployments, skipping");
                plan.missing_contracts.push(function.contract.clone());
            }
            continue;
        };

        let desired_secs = function.delay_secs();
        for target in addresses {
            let current_secs = delays.get(target, &function.selector);
            let action = if current_secs == desired_secs {
                DelayAction::Unchanged
            } else if current_secs == 0 {
                DelayAction::Set
            } else {
                DelayAction::PrepareUpdate {
                    payload: update_delay_payload(*target, function.selector, desired_secs)?,
                }
            };
            plan.entries.push(PlannedDelay {
                contract: function.contract.clone(),
                signature: function.signature.clone(),
                target: *target,
                selector: function.selector,
                current_secs,
                desired_secs,
                action,
            });
        }
    }
    Ok(plan)
}

/// Outcome of [`apply_plan`].
#[derive(Debug, Default)]
pub struct ApplyReport {
    /// Ready calls executed before planning, with their results.
    pub swept: Vec<(CallId, Result<(), TimelockError>)>,
    pub plan: DelayPlan,
    pub delays_set: usize,
    pub updates_prepared: Vec<CallId>,
    /// Updates skipped because an identical call is already pending.
    pub already_pending: usize,
    pub failures: Vec<(String, TimelockError)>,
}

/// Bring the timelock's delays in line with `functions`.
///
/// Refuses to run while any function is unreviewed. Ready calls are
/// executed first so the plan sees delays updated by earlier runs. A
/// failing entry is recorded and does not stop the remaining ones.
pub fn apply_plan<A: Authority, C: Clock, T: CallTarget>(
    timelock: &mut CallTimelock<A, C, T>,
    origin: &Origin,
    functions: &GovernableFunctions,
    deployments: &Deployments,
) -> Result<ApplyReport, OpsError> {
    functions.ensure_reviewed()?;

    let mut report = ApplyReport {
        swept: timelock.execute_ready_calls(origin),
        ..ApplyReport::default()
    };
    for (id, result) in &report.swept {
        match result {
            Ok(()) => info!(id, "executed ready call"),
            Err(e) => warn!(id, error = %e, "ready call failed"),
        }
    }

    report.plan = plan_delays(functions, deployments, timelock.delays())?;
    for entry in report.plan.changes() {
        let label = format!("{}.{}@{}", entry.contract, entry.signature, entry.target);
        let result = match &entry.action {
            DelayAction::Unchanged => continue,
            DelayAction::Set => {
                info!(%label, delay = %format_delay(entry.desired_secs), "setting delay");
                timelock
                    .set_delay(origin, entry.target, entry.selector, entry.desired_secs)
                    .map(|()| report.delays_set += 1)
            }
            DelayAction::PrepareUpdate { payload } => {
                info!(
                    %label,
                    from = %format_delay(entry.current_secs),
                    to = %format_delay(entry.desired_secs),
                    "preparing delay update"
                );
                let address = timelock.address();
                match timelock.prepare_call(origin, address, payload.clone(), true) {
                    Ok(id) => {
                        report.updates_prepared.push(id);
                        Ok(())
                    }
                    Err(TimelockError::DuplicatePending) => {
                        info!(%label, "delay update already pending");
                        report.already_pending += 1;
                        Ok(())
                    }
                    Err(e) => Err(e),
                }
            }
        };
        if let Err(e) = result {
            warn!(%label, error = %e, "delay change failed");
            report.failures.push((label, e));
        }
    }
    Ok(report)
}
