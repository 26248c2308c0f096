//! Replace a catch block with a single call.
//!
//! [`attempt`] runs a closure and returns `Some` of its value, or `None` if it panicked.
//! [`attempt_or`] does the same but returns a fallback instead of `None`. Whenever a fault is
//! intercepted, the shared catch action of the [`Config`] in use runs first, so the same side
//! effect (a log line, a notification, a counter) happens everywhere without repeating it at
//! every call site.
//!
//! ```
//! let items = vec!["only"];
//!
//! tryme::global().set_catch_action(|fault| eprintln!("caught: {fault}"));
//!
//! assert_eq!(tryme::attempt(|| "worked"), Some("worked"));
//! assert_eq!(tryme::attempt(|| items[1]), None);
//! assert_eq!(tryme::attempt_or("failed", || items[1]), "failed");
//! ```
//!
//! Only unwinding panics are intercepted. Stack overflows, allocation failures and any panic in
//! a binary built with `panic = "abort"` still terminate the process.

pub use crate::config::{global, CatchAction, Config};
pub use crate::fault::{Fault, Location, Panic};

pub mod config;
pub mod context;
pub mod fault;
pub mod hooks;

/// Run `computation` with the [`global`] configuration.
///
/// Returns `Some` of its value, or runs the global catch action and returns `None` if it
/// panicked. See [`Config::attempt`].
///
/// # Arguments
///
/// * `computation`: The work to run. If it returns an `Option`, the result is nested; use
///   [`attempt_or`] with `None` as the fallback to flatten it.
///
/// returns: Option<T>
///
/// # Examples
///
/// ```
/// let mut hits = 1;
/// tryme::attempt(|| hits += 1);
/// assert_eq!(hits, 2);
/// ```
#[inline]
pub fn attempt<T, F>(computation: F) -> Option<T>
where
    F: FnOnce() -> T,
{
    global().attempt(computation)
}

/// Run `computation` with the [`global`] configuration, returning `fallback` if it panicked.
///
/// See [`Config::attempt_or`].
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
/// let v: Vec<i32> = Vec::new();
/// assert_eq!(tryme::attempt_or(-1, || v[0]), -1);
/// ```
#[inline]
pub fn attempt_or<T, F>(fallback: T, computation: F) -> T
where
    F: FnOnce() -> T,
{
    global().attempt_or(fallback, computation)
}

/// Run a `Result`-returning `computation` with the [`global`] configuration.
///
/// See [`Config::attempt_result`].
///
/// # Arguments
///
/// * `computation`: The work to run. `Err` and panics both run the catch action.
///
/// returns: Option<T>
///
/// # Examples
///
/// ```
/// assert_eq!(tryme::attempt_result(|| "7".parse::<u8>()), Some(7));
/// assert_eq!(tryme::attempt_result(|| "700".parse::<u8>()), None);
/// ```
#[inline]
pub fn attempt_result<T, E, F>(computation: F) -> Option<T>
where
    F: FnOnce() -> Result<T, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    global().attempt_result(computation)
}

/// Run a `Result`-returning `computation` with the [`global`] configuration, returning
/// `fallback` on `Err` or panic.
///
/// See [`Config::attempt_result_or`].
#[inline]
pub fn attempt_result_or<T, E, F>(fallback: T, computation: F) -> T
where
    F: FnOnce() -> Result<T, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    global().attempt_result_or(fallback, computation)
}
