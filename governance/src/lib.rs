//! Governance timelock for privileged administrative calls.
//!
//! The owner prepares calls onto managed contracts; each call waits out the
//! delay configured for its `(target, selector)` before anyone may execute
//! it. Undelayed calls may be quick-executed by the owner directly.
//!
//! Delays are set once by the owner and afterwards only changed by a call
//! the timelock executes on itself, so loosening a protection takes at
//! least as long as the protection itself.

pub mod calls;
pub mod delay;
pub mod error;
pub mod events;
pub mod host;
pub mod origin;
pub mod record;
pub mod registry;
pub mod state;
pub mod timelock;

pub use calls::{update_delay_payload, TimelockCall};
pub use delay::{DelayEntry, DelayTable};
pub use error::TimelockError;
pub use events::TimelockEvent;
pub use host::{Authority, CallTarget, Clock, FixedClock, InvokeError, NoTargets, SingleOwner, SystemClock};
pub use origin::Origin;
pub use record::{CallId, CallRecord, CallStatus};
pub use registry::CallRegistry;
pub use state::TimelockState;
pub use timelock::CallTimelock;
