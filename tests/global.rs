use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

const STR_WORKED: &str = "worked";
const STR_FAILED: &str = "failed";

fn trigger_fail() -> &'static str {
    let items = vec![""];
    items[1]
}

// Everything touching the process-wide configuration lives in one test so nothing races on it.
#[test]
fn global_configuration() {
    let config = tryme::global();
    assert!(config.same_as(tryme::global()));

    // Default action is a no-op.
    assert_eq!(tryme::attempt(trigger_fail), None);
    assert_eq!(tryme::attempt_or(STR_FAILED, trigger_fail), STR_FAILED);

    let a = Arc::new(AtomicUsize::new(0));
    let counter = a.clone();
    config.set_catch_action(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    assert_eq!(tryme::attempt(|| STR_WORKED), Some(STR_WORKED));
    assert_eq!(tryme::attempt_or(STR_FAILED, || STR_WORKED), STR_WORKED);
    assert_eq!(a.load(Ordering::SeqCst), 0);

    tryme::attempt(trigger_fail);
    tryme::attempt(trigger_fail);
    assert_eq!(tryme::attempt_or(STR_FAILED, trigger_fail), STR_FAILED);
    assert_eq!(a.load(Ordering::SeqCst), 3);

    let b = Arc::new(AtomicUsize::new(0));
    let counter = b.clone();
    config.set_catch_action(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    tryme::attempt(trigger_fail);
    assert_eq!(a.load(Ordering::SeqCst), 3);
    assert_eq!(b.load(Ordering::SeqCst), 1);

    assert_eq!(tryme::attempt_result(|| "x".parse::<i32>()), None);
    assert_eq!(tryme::attempt_result_or(5, || "x".parse::<i32>()), 5);
    assert_eq!(b.load(Ordering::SeqCst), 3);

    // A hook installed on another thread is seen here.
    let order = Arc::new(Mutex::new(Vec::new()));
    let sink = order.clone();
    std::thread::spawn(move || {
        tryme::global().set_catch_action(move |fault| {
            sink.lock().unwrap().push(fault.message());
        });
    })
    .join()
    .unwrap();
    tryme::attempt(|| panic!("one"));
    tryme::attempt(|| panic!("two"));
    tryme::attempt(|| panic!("three"));
    assert_eq!(*order.lock().unwrap(), vec!["one", "two", "three"]);

    config.reset_catch_action();
    assert_eq!(tryme::attempt(trigger_fail), None);
    assert_eq!(order.lock().unwrap().len(), 3);
}
