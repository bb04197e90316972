use anyhow::Context;
use govlock_governance::{
    CallRecord, CallTimelock, Clock, FixedClock, NoTargets, Origin, SingleOwner, TimelockCall, TimelockState,
};
use govlock_ops::{
    apply_plan, CallDecoder, DelayAction, Deployments, GovernableFunctions, SignatureBook, ToolConfig,
};
use govlock_types::{CallPayload, Selector, Timestamp};
use govlock_utils::format_delay;
use tracing::{info, warn};

type SnapshotTimelock = CallTimelock<SingleOwner, FixedClock, NoTargets>;

pub fn validate_functions(config: &ToolConfig) -> anyhow::Result<()> {
    let functions = GovernableFunctions::load(&config.functions_path)
        .with_context(|| format!("reading {}", config.functions_path.display()))?;
    functions.check_selectors()?;
    functions.ensure_reviewed()?;
    info!(count = functions.len(), "governable functions validated");
    println!("All functions are reviewed");
    Ok(())
}

pub fn decode(config: &ToolConfig, payload: &str) -> anyhow::Result<()> {
    let payload: CallPayload = payload.parse().context("parsing payload hex")?;
    let book = load_book(config)?;
    println!("{}", CallDecoder::new(&book).render(&payload)?);
    Ok(())
}

pub fn selector(signature: &str) {
    println!("{}", Selector::from_signature(signature));
}

pub fn status(config: &ToolConfig, now: Option<u64>) -> anyhow::Result<()> {
    let timelock = load_timelock(config, now)?;
    let book = load_book(config)?;

    println!("timelock {} at {}", timelock.address(), timelock.clock().now());
    println!(
        "calls: {} total, {} pending, {} executed, {} cancelled",
        timelock.total_calls(),
        timelock.pending_calls().count(),
        timelock.executed_calls().count(),
        timelock.cancelled_calls().count()
    );

    println!("ready:");
    for record in timelock.ready_calls() {
        print_call(&timelock, &book, record)?;
    }
    println!("not ready:");
    for record in timelock.not_ready_calls() {
        print_call(&timelock, &book, record)?;
    }
    Ok(())
}

/// Dry-run the delay reconciliation against the snapshot and print the
/// payloads the owner needs to submit, in order.
pub fn plan(config: &ToolConfig, now: Option<u64>) -> anyhow::Result<()> {
    config.require_addresses()?;
    let functions = GovernableFunctions::load(&config.functions_path)
        .with_context(|| format!("reading {}", config.functions_path.display()))?;
    functions.check_selectors()?;
    let deployments = Deployments::load(&config.deployments_path)
        .with_context(|| format!("reading {}", config.deployments_path.display()))?;
    let mut timelock = load_timelock(config, now)?;

    let report = apply_plan(&mut timelock, &Origin::external(config.owner), &functions, &deployments)?;

    for (id, _) in &report.swept {
        println!("execute call {id}");
        println!("  {}", TimelockCall::ExecuteCall { id: *id }.encode()?);
    }
    for entry in report.plan.changes() {
        let call = match &entry.action {
            DelayAction::Unchanged => continue,
            DelayAction::Set => TimelockCall::SetDelay {
                target: entry.target,
                selector: entry.selector,
                delay_secs: entry.desired_secs,
            },
            DelayAction::PrepareUpdate { payload } => TimelockCall::PrepareCall {
                target: timelock.address(),
                payload: payload.clone(),
                validate: true,
            },
        };
        println!(
            "{} {}.{} at {}: {} -> {}",
            call.name(),
            entry.contract,
            entry.signature,
            entry.target,
            format_delay(entry.current_secs),
            format_delay(entry.desired_secs)
        );
        println!("  {}", call.encode()?);
    }
    for contract in &report.plan.missing_contracts {
        println!("skipped {contract}: no deployments");
    }
    for (label, error) in &report.failures {
        warn!(%label, %error, "change would fail");
    }
    if report.plan.changes().count() == 0 && report.swept.is_empty() {
        println!("delays are up to date");
    }
    Ok(())
}

fn load_timelock(config: &ToolConfig, now: Option<u64>) -> anyhow::Result<SnapshotTimelock> {
    let json = std::fs::read_to_string(&config.state_path)
        .with_context(|| format!("reading {}", config.state_path.display()))?;
    let state = TimelockState::from_json(&json)?;
    let now = now.map(Timestamp::new).unwrap_or_else(Timestamp::now);
    let timelock = CallTimelock::restore(
        config.timelock_address,
        SingleOwner(config.owner),
        FixedClock(now),
        NoTargets,
        state,
    )?;
    Ok(timelock)
}

fn load_book(config: &ToolConfig) -> anyhow::Result<SignatureBook> {
    let mut book = SignatureBook::with_timelock_signatures();
    if config.signatures_path.exists() {
        book.merge(SignatureBook::load(&config.signatures_path)?);
    }
    if config.functions_path.exists() {
        book.extend_from_functions(&GovernableFunctions::load(&config.functions_path)?);
    }
    Ok(book)
}

fn print_call(timelock: &SnapshotTimelock, book: &SignatureBook, record: &CallRecord) -> anyhow::Result<()> {
    let delay = timelock.pending_call_delay(record.id())?;
    let function = if record.target() == timelock.address() {
        CallDecoder::new(book)
            .render(record.payload())
            .unwrap_or_else(|_| record.function_signature().to_string())
    } else {
        book.lookup(&record.selector())
            .unwrap_or(record.function_signature())
            .to_string()
    };
    println!(
        "  #{} {} {} (delay {}, ready at {})",
        record.id(),
        record.target(),
        function,
        format_delay(delay),
        record.created_at().saturating_add(delay)
    );
    Ok(())
}
