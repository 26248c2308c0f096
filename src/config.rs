use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::context;
use crate::fault::{Fault, Panic};

/// Side effect run every time an attempt intercepts a fault.
pub type CatchAction = dyn Fn(&Fault) + Send + Sync + 'static;

/// Handle to a shared catch action.
///
/// Cloning a `Config` yields another handle to the *same* catch action: replacing it through any
/// clone is seen by all of them. Create one at the root of an application and hand clones to the
/// code that needs it, or use the process-wide [`global`] instance.
#[derive(Clone)]
pub struct Config {
    catch_action: Arc<RwLock<Arc<CatchAction>>>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config").finish_non_exhaustive()
    }
}

impl Config {
    /// Create a configuration whose catch action does nothing.
    pub fn new() -> Self {
        Self {
            catch_action: Arc::new(RwLock::new(crate::hooks::noop())),
        }
    }

    /// Create a configuration with `action` as its catch action.
    pub fn with_catch_action<A>(action: A) -> Self
    where
        A: Fn(&Fault) + Send + Sync + 'static,
    {
        let config = Self::new();
        config.set_catch_action(action);
        config
    }

    /// Replace the catch action. The last write wins.
    ///
    /// Attempts that fault after this returns run `action`, including attempts already in
    /// progress on other threads.
    pub fn set_catch_action<A>(&self, action: A) -> &Self
    where
        A: Fn(&Fault) + Send + Sync + 'static,
    {
        self.replace_catch_action(Arc::new(action));
        self
    }

    /// Replace the catch action with a shared one, returning the previous action.
    pub fn replace_catch_action(&self, action: Arc<CatchAction>) -> Arc<CatchAction> {
        let mut slot = self
            .catch_action
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *slot, action)
    }

    /// Restore the no-op catch action.
    pub fn reset_catch_action(&self) -> &Self {
        self.replace_catch_action(crate::hooks::noop());
        self
    }

    /// The catch action currently in effect.
    pub fn catch_action(&self) -> Arc<CatchAction> {
        self.catch_action
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether two handles share the same catch action slot.
    pub fn same_as(&self, other: &Config) -> bool {
        Arc::ptr_eq(&self.catch_action, &other.catch_action)
    }

    fn notify(&self, fault: &Fault) {
        // The lock is released before the action runs so the action may replace itself.
        let action = self.catch_action();
        action(fault);
    }

    /// Run `computation`, returning its value or, if it panics, run the catch action and
    /// return `fallback`.
    ///
    /// The computation runs exactly once on the calling thread. A panic raised by the catch
    /// action itself is not intercepted: it propagates to the caller.
    ///
    /// # Arguments
    ///
    /// * `fallback`: Returned instead of the computation's value if it panics.
    /// * `computation`: The work to run.
    ///
    /// returns: T
    ///
    /// # Examples
    ///
    /// ```
    /// let config = tryme::Config::new();
    ///
    /// let items = vec!["only"];
    /// assert_eq!(config.attempt_or("failed", || items[1]), "failed");
    /// assert_eq!(config.attempt_or("failed", || "worked"), "worked");
    /// ```
    pub fn attempt_or<T, F>(&self, fallback: T, computation: F) -> T
    where
        F: FnOnce() -> T,
    {
        context::take_capture();
        let guard = context::enter();
        let res = panic::catch_unwind(AssertUnwindSafe(computation));
        drop(guard);
        let capture = context::take_capture();
        match res {
            Ok(value) => value,
            Err(payload) => {
                self.notify(&Fault::Panic(Panic::new(payload, capture)));
                fallback
            }
        }
    }

    /// Run `computation`, returning `Some` of its value or, if it panics, run the catch action
    /// and return `None`.
    ///
    /// The value is always wrapped, so a computation returning `Option<U>` yields
    /// `Option<Option<U>>`. To get a single `None` for both "panicked" and "returned `None`",
    /// use `attempt_or(None, computation)` instead.
    ///
    /// # Arguments
    ///
    /// * `computation`: The work to run.
    ///
    /// returns: Option<T>
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    /// use std::sync::Arc;
    ///
    /// let caught = Arc::new(AtomicUsize::new(0));
    /// let counter = caught.clone();
    /// let config = tryme::Config::with_catch_action(move |_| {
    ///     counter.fetch_add(1, Ordering::SeqCst);
    /// });
    ///
    /// assert_eq!(config.attempt(|| "worked"), Some("worked"));
    /// assert_eq!(config.attempt(|| -> &str { panic!("boom") }), None);
    /// assert_eq!(caught.load(Ordering::SeqCst), 1);
    /// ```
    pub fn attempt<T, F>(&self, computation: F) -> Option<T>
    where
        F: FnOnce() -> T,
    {
        self.attempt_or(None, || Some(computation()))
    }

    /// Like [`attempt_or`](Config::attempt_or) for computations that report failure with
    /// `Err`. Both an `Err` and a panic count as a fault.
    ///
    /// # Arguments
    ///
    /// * `fallback`: Returned if the computation returns `Err` or panics.
    /// * `computation`: The work to run.
    ///
    /// returns: T
    ///
    /// # Examples
    ///
    /// ```
    /// let config = tryme::Config::new();
    /// assert_eq!(config.attempt_result_or(-1, || "10".parse::<i32>()), 10);
    /// assert_eq!(config.attempt_result_or(-1, || "abc".parse::<i32>()), -1);
    /// ```
    pub fn attempt_result_or<T, E, F>(&self, fallback: T, computation: F) -> T
    where
        F: FnOnce() -> Result<T, E>,
        E: std::error::Error + Send + Sync + 'static,
    {
        match self.attempt(computation) {
            Some(Ok(value)) => value,
            Some(Err(err)) => {
                self.notify(&Fault::Error(Box::new(err)));
                fallback
            }
            None => fallback,
        }
    }

    /// Like [`attempt`](Config::attempt) for computations that report failure with `Err`.
    pub fn attempt_result<T, E, F>(&self, computation: F) -> Option<T>
    where
        F: FnOnce() -> Result<T, E>,
        E: std::error::Error + Send + Sync + 'static,
    {
        self.attempt_result_or(None, || computation().map(Some))
    }
}

static GLOBAL: OnceLock<Config> = OnceLock::new();

/// The process-wide configuration used by the free functions of this crate.
pub fn global() -> &'static Config {
    GLOBAL.get_or_init(Config::new)
}
