// Integration tests for the process-wide registry and its free functions
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use smokesignal::{callback, Args, CallbackRef, DeliveryPolicy, RegistryConfig, SignalError};

// Tests in this file share one registry; run them one at a time
static SERIAL: Mutex<()> = parking_lot::const_mutex(());

/// Serial lock that resets the shared registry on drop, including when the
/// test panics
struct Isolated {
    _serial: MutexGuard<'static, ()>,
}

impl Drop for Isolated {
    fn drop(&mut self) {
        smokesignal::clear_all();
        smokesignal::configure(RegistryConfig::default());
    }
}

fn isolated() -> Isolated {
    Isolated { _serial: SERIAL.lock() }
}

fn counter() -> (Arc<AtomicUsize>, CallbackRef<Args>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let cb = callback(move |_args: &Args| {
        seen.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    (calls, cb)
}

#[test]
fn test_once_example() {
    let _guard = isolated();
    let (calls, cb) = counter();

    smokesignal::once("ready", cb.clone());
    smokesignal::emit("ready", &Args::new()).unwrap();
    smokesignal::emit("ready", &Args::new()).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(smokesignal::responds_to(&cb, "ready"));
}

#[test]
fn test_disconnect_from_example() {
    let _guard = isolated();
    let (_, cb) = counter();

    smokesignal::on(["a", "b"], cb.clone());
    smokesignal::disconnect_from(&cb, "a");

    assert!(!smokesignal::responds_to(&cb, "a"));
    assert!(smokesignal::responds_to(&cb, "b"));
}

#[test]
fn test_max_calls_and_disconnect() {
    let _guard = isolated();
    let (calls, cb) = counter();

    let handle = smokesignal::on_with_limit(["tick", "tock"], cb.clone(), Some(3));
    for _ in 0..5 {
        smokesignal::emit("tick", &Args::new()).unwrap();
    }
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert!(handle.is_exhausted());

    let mut signals = smokesignal::signals(&cb);
    signals.sort();
    assert_eq!(signals, vec!["tick", "tock"]);

    assert_eq!(smokesignal::disconnect(&cb), 2);
    assert!(smokesignal::signals(&cb).is_empty());
}

#[test]
fn test_clear_leaves_other_signals() {
    let _guard = isolated();
    let (_, cb) = counter();

    smokesignal::on(["keep", "drop"], cb.clone());
    smokesignal::clear("drop");

    assert!(smokesignal::responds_to(&cb, "keep"));
    assert!(!smokesignal::responds_to(&cb, "drop"));

    smokesignal::clear_all();
    assert!(smokesignal::signals(&cb).is_empty());
}

#[test]
fn test_registrar_on_global_registry() {
    let _guard = isolated();
    let (calls, cb) = counter();

    let registrar = smokesignal::registrar(["deferred"]).max_calls(2);
    registrar.register(cb.clone());

    for _ in 0..4 {
        smokesignal::emit("deferred", &Args::new()).unwrap();
    }
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_callbacks_may_reenter_the_global_registry() {
    let _guard = isolated();
    let (calls, follow_up) = counter();

    let chained = follow_up.clone();
    smokesignal::once(
        "first",
        callback(move |args: &Args| {
            smokesignal::on("second", chained.clone());
            smokesignal::emit("second", args)?;
            Ok(())
        }),
    );

    smokesignal::emit("first", &Args::new()).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(smokesignal::responds_to(&follow_up, "second"));
}

#[test]
fn test_error_propagates_to_emitter() {
    let _guard = isolated();

    smokesignal::on("explode", callback(|_args: &Args| anyhow::bail!("kaboom")));

    let error = smokesignal::emit("explode", &Args::new()).unwrap_err();
    assert!(matches!(error, SignalError::CallbackFailed { .. }));
    assert_eq!(error.into_callback_error().to_string(), "kaboom");

    smokesignal::configure(RegistryConfig::with_delivery(DeliveryPolicy::Isolate));
    let summary = smokesignal::emit("explode", &Args::new()).unwrap();
    assert_eq!(summary.failed, 1);
}

#[test]
fn test_with_registry_gives_direct_access() {
    let _guard = isolated();
    let (_, cb) = counter();

    smokesignal::on("inspect", cb.clone());
    let count = smokesignal::with_registry(|registry| registry.receiver_count("inspect"));
    assert_eq!(count, 1);

    let before = smokesignal::stats().signals_emitted;
    smokesignal::emit("inspect", &Args::new()).unwrap();
    assert_eq!(smokesignal::stats().signals_emitted, before + 1);
}

#[test]
fn test_failed_test_does_not_leak_registrations() {
    let (_, cb) = counter();

    let leaked = cb.clone();
    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
        let _guard = isolated();
        smokesignal::on("leftover", leaked);
        smokesignal::configure(RegistryConfig::with_delivery(DeliveryPolicy::Isolate));
        panic!("assertion failed mid-test");
    }));
    assert!(outcome.is_err());

    let _guard = isolated();
    assert!(!smokesignal::responds_to(&cb, "leftover"));

    smokesignal::on("leftover", callback(|_args: &Args| anyhow::bail!("still fail-fast")));
    assert!(smokesignal::emit("leftover", &Args::new()).is_err());
}
