//! Ready-made catch actions.

use std::sync::Arc;

use crate::config::CatchAction;
use crate::fault::Fault;

/// The default catch action: ignores the fault.
pub fn noop() -> Arc<CatchAction> {
    Arc::new(|_: &Fault| {})
}

/// A catch action that reports each fault as a `tracing` event at `WARN` level.
///
/// The crate never logs by itself; install this when faults should end up in the application's
/// log.
///
/// # Examples
///
/// ```
/// tryme::global().replace_catch_action(tryme::hooks::trace());
/// ```
pub fn trace() -> Arc<CatchAction> {
    Arc::new(|fault: &Fault| {
        let kind = if fault.is_panic() { "panic" } else { "error" };
        match fault.location() {
            Some(location) => tracing::warn!(
                kind,
                location = %location,
                message = %fault.message(),
                "attempt recovered from fault"
            ),
            None => tracing::warn!(
                kind,
                message = %fault.message(),
                "attempt recovered from fault"
            ),
        }
    })
}
