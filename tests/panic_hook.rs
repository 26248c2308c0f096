use std::panic;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// Runs in its own process: the application hook must be in place before the crate chains onto it.
#[test]
fn application_hook_sees_only_panics_outside_attempts() {
    let reported = Arc::new(AtomicUsize::new(0));
    let counter = reported.clone();
    panic::set_hook(Box::new(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    let config = tryme::Config::new();
    assert_eq!(config.attempt_or(0, || -> i32 { panic!("inside") }), 0);
    assert_eq!(reported.load(Ordering::SeqCst), 0);

    let res = panic::catch_unwind(|| panic!("outside"));
    assert!(res.is_err());
    assert_eq!(reported.load(Ordering::SeqCst), 1);
    assert_eq!(tryme::context::depth(), 0);

    // Nested inside an attempt the hook stays quiet again.
    config.attempt(|| {
        assert_eq!(tryme::context::depth(), 1);
        config.attempt(|| panic!("nested"));
    });
    assert_eq!(reported.load(Ordering::SeqCst), 1);

    // A panic the computation catches itself is also kept from the application hook.
    let handled = config.attempt(|| panic::catch_unwind(|| panic!("handled inside")).is_err());
    assert_eq!(handled, Some(true));
    assert_eq!(reported.load(Ordering::SeqCst), 1);

    let _ = panic::take_hook();
}
