//! Process-wide registry
//!
//! A single `SignalRegistry<String, Args>` created on first use and kept until
//! the process exits. The free functions here operate on it and are
//! re-exported at the crate root.
//!
//! The registry lock is held only while the registry itself is read or
//! changed. [`emit`] takes a snapshot of the receivers, releases the lock and
//! then runs the callbacks, so callbacks may register, disconnect or emit on
//! the global registry themselves.

use std::sync::OnceLock;

use log::debug;
use parking_lot::{Mutex, MutexGuard};

use crate::signals::args::Args;
use crate::signals::config::RegistryConfig;
use crate::signals::dispatch::{DeliveryStats, EmitSummary};
use crate::signals::error::SignalResult;
use crate::signals::receiver::{CallbackRef, ReceiverHandle, Target};
use crate::signals::registrar::Registrar;
use crate::signals::registry::SignalRegistry;
use crate::signals::signal_set::IntoSignals;

static REGISTRY: OnceLock<Mutex<SignalRegistry>> = OnceLock::new();

fn registry() -> MutexGuard<'static, SignalRegistry> {
    REGISTRY
        .get_or_init(|| {
            debug!("Creating process-wide signal registry");
            Mutex::new(SignalRegistry::new())
        })
        .lock()
}

/// Run `f` with exclusive access to the process-wide registry
///
/// `f` must not call back into this module; the lock is not re-entrant.
pub fn with_registry<R>(f: impl FnOnce(&mut SignalRegistry) -> R) -> R {
    f(&mut registry())
}

/// Replace the process-wide registry's configuration
pub fn configure(config: RegistryConfig) {
    registry().configure(config);
}

/// Emit `signal` on the process-wide registry
pub fn emit(signal: &str, args: &Args) -> SignalResult<EmitSummary> {
    let dispatch = registry().dispatch(signal);
    dispatch.run(args)
}

pub fn on(signals: impl IntoSignals<String>, callback: CallbackRef<Args>) -> ReceiverHandle<Args> {
    registry().on(signals, callback)
}

pub fn on_with_limit(
    signals: impl IntoSignals<String>,
    callback: CallbackRef<Args>,
    max_calls: Option<usize>,
) -> ReceiverHandle<Args> {
    registry().on_with_limit(signals, callback, max_calls)
}

pub fn once(signals: impl IntoSignals<String>, callback: CallbackRef<Args>) -> ReceiverHandle<Args> {
    registry().once(signals, callback)
}

/// Registrar that attaches callbacks to the process-wide registry
pub fn registrar(signals: impl IntoSignals<String>) -> GlobalRegistrar {
    GlobalRegistrar(Registrar::new(signals))
}

/// Deferred registration against the process-wide registry
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalRegistrar(Registrar);

impl GlobalRegistrar {
    pub fn max_calls(self, max_calls: usize) -> Self {
        Self(self.0.max_calls(max_calls))
    }

    pub fn once(self) -> Self {
        Self(self.0.once())
    }

    pub fn register(&self, callback: CallbackRef<Args>) -> ReceiverHandle<Args> {
        self.0.register(&mut registry(), callback)
    }
}

pub fn responds_to<T>(target: &T, signal: &str) -> bool
where
    T: Target<Args> + ?Sized,
{
    registry().responds_to(target, signal)
}

pub fn signals<T>(target: &T) -> Vec<String>
where
    T: Target<Args> + ?Sized,
{
    registry().signals(target)
}

/// Remove `target` from every signal; scans the whole registry
pub fn disconnect<T>(target: &T) -> usize
where
    T: Target<Args> + ?Sized,
{
    registry().disconnect(target)
}

pub fn disconnect_from<T>(target: &T, signals: impl IntoSignals<String>) -> usize
where
    T: Target<Args> + ?Sized,
{
    registry().disconnect_from(target, signals)
}

pub fn clear(signals: impl IntoSignals<String>) {
    registry().clear(signals);
}

pub fn clear_all() {
    registry().clear_all();
}

pub fn stats() -> DeliveryStats {
    registry().stats()
}
