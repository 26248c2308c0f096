//! Per-thread bookkeeping of active attempt scopes.
//!
//! A panic raised while a scope is active is recorded here by a chained panic hook instead of
//! being printed, so the attempt that intercepts it can build a [`Fault`](crate::Fault) with the
//! panic's source location.
//!
//! The hook cannot tell which `catch_unwind` a panic will land in. While any scope is active on
//! a thread, *every* panic on that thread skips the previously installed hook, including panics
//! that the computation (or a library it calls) catches with its own `catch_unwind`. Those are
//! neither printed nor reported to the catch action. Outside of attempts the previous hook runs
//! unchanged.

use std::cell::{Cell, RefCell};
use std::panic;
use std::sync::Once;
use std::thread_local;

use crate::fault::Location;

/// What the panic hook saw for the most recent panic inside a scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Capture {
    pub(crate) message: Option<String>,
    pub(crate) location: Option<Location>,
}

struct Scopes {
    depth: Cell<u32>,
    captured: RefCell<Option<Capture>>,
}

impl Scopes {
    const fn new() -> Self {
        Self {
            depth: Cell::new(0),
            captured: RefCell::new(None),
        }
    }
}

thread_local! {
    static SCOPES: Scopes = const { Scopes::new() };
}

static INSTALL_HOOK: Once = Once::new();

/// Install the chained panic hook, once per process.
///
/// Panics outside of any scope go to whatever hook was installed before.
fn install_hook() {
    INSTALL_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let recorded = SCOPES
                .try_with(|scopes| {
                    if scopes.depth.get() == 0 {
                        return false;
                    }
                    let capture = Capture {
                        message: crate::fault::payload_message(info.payload()),
                        location: info.location().map(Location::from),
                    };
                    match scopes.captured.try_borrow_mut() {
                        Ok(mut slot) => {
                            *slot = Some(capture);
                            true
                        }
                        Err(_) => false,
                    }
                })
                .unwrap_or(false);
            if !recorded {
                previous(info);
            }
        }));
    });
}

/// Marks the current thread as inside an attempt until dropped.
pub(crate) struct ScopeGuard {
    _not_send: std::marker::PhantomData<*mut ()>,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        SCOPES.with(|scopes| scopes.depth.set(scopes.depth.get() - 1));
    }
}

/// Enter an attempt scope on the current thread.
pub(crate) fn enter() -> ScopeGuard {
    install_hook();
    SCOPES.with(|scopes| scopes.depth.set(scopes.depth.get() + 1));
    ScopeGuard {
        _not_send: std::marker::PhantomData,
    }
}

/// Take whatever the panic hook recorded on this thread, leaving the slot empty.
pub(crate) fn take_capture() -> Option<Capture> {
    SCOPES.with(|scopes| scopes.captured.borrow_mut().take())
}

/// Number of scopes currently active on this thread.
pub fn depth() -> u32 {
    SCOPES.with(|scopes| scopes.depth.get())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guards_nest_and_unwind() {
        assert_eq!(depth(), 0);
        {
            let _outer = enter();
            assert_eq!(depth(), 1);
            {
                let _inner = enter();
                assert_eq!(depth(), 2);
            }
            assert_eq!(depth(), 1);
        }
        assert_eq!(depth(), 0);
    }

    #[test]
    fn panic_inside_scope_is_captured() {
        let guard = enter();
        let res = panic::catch_unwind(|| panic!("captured here"));
        drop(guard);
        assert!(res.is_err());

        let capture = take_capture().unwrap();
        assert_eq!(capture.message.as_deref(), Some("captured here"));
        assert!(capture.location.unwrap().file.ends_with("context.rs"));
        assert!(take_capture().is_none());
    }

    #[test]
    fn scope_depth_is_restored_after_panic() {
        let res = panic::catch_unwind(|| {
            let _guard = enter();
            panic!("unwinds through the guard");
        });
        assert!(res.is_err());
        assert_eq!(depth(), 0);
        take_capture();
    }
}
