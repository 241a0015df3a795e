//! Signal Registry
//!
//! Maps each signal identifier to the set of receivers registered for it and
//! implements registration, queries, disconnection, clearing and emit.
//!
//! The registry has no internal locking. Mutating operations take `&mut self`;
//! callers sharing a registry between threads wrap it themselves (see
//! [`crate::signals::global`]).

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use log::debug;
use parking_lot::Mutex;

use crate::signals::args::Args;
use crate::signals::config::RegistryConfig;
use crate::signals::dispatch::{DeliveryStats, Dispatch, EmitSummary};
use crate::signals::error::SignalResult;
use crate::signals::receiver::{CallbackRef, Receiver, ReceiverHandle, ReceiverId, Target};
use crate::signals::signal_set::{IntoSignals, SignalId};

type ReceiverSet<A> = HashMap<ReceiverId, ReceiverHandle<A>>;

/// Registry of callbacks keyed by signal
pub struct SignalRegistry<S = String, A = Args> {
    receivers: HashMap<S, ReceiverSet<A>>,
    config: RegistryConfig,
    stats: Arc<Mutex<DeliveryStats>>,
}

impl<S, A> SignalRegistry<S, A>
where
    S: SignalId,
    A: 'static,
{
    /// Create an empty registry with the default (fail-fast) configuration
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            receivers: HashMap::new(),
            config,
            stats: Arc::new(Mutex::new(DeliveryStats::default())),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Replace the configuration; affects subsequent emits only
    pub fn configure(&mut self, config: RegistryConfig) {
        debug!("Registry delivery policy set to {}", config.delivery);
        self.config = config;
    }

    /// Emit `signal`, invoking every receiver registered for it with `args`
    ///
    /// Receivers run in no particular order. With the default fail-fast
    /// policy the first callback error stops delivery and is returned.
    /// Emitting a signal nobody listens to does nothing.
    pub fn emit<Q>(&self, signal: &Q, args: &A) -> SignalResult<EmitSummary>
    where
        S: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        self.dispatch(signal).run(args)
    }

    /// Snapshot the receivers of `signal` for a later [`Dispatch::run`]
    pub fn dispatch<Q>(&self, signal: &Q) -> Dispatch<A>
    where
        S: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        Dispatch::new(
            format!("{:?}", signal),
            self.receivers(signal),
            self.config.delivery,
            Arc::clone(&self.stats),
        )
    }

    /// Register `callback` for one or more signals without a call limit
    pub fn on(&mut self, signals: impl IntoSignals<S>, callback: CallbackRef<A>) -> ReceiverHandle<A> {
        self.on_with_limit(signals, callback, None)
    }

    /// Register `callback` to run at most once
    pub fn once(&mut self, signals: impl IntoSignals<S>, callback: CallbackRef<A>) -> ReceiverHandle<A> {
        self.on_with_limit(signals, callback, Some(1))
    }

    /// Register `callback` for one or more signals
    ///
    /// A single receiver is created and shared by every listed signal, so
    /// `max_calls` is counted across all of them. Each call creates a new
    /// receiver; registering the same callback twice yields two receivers.
    pub fn on_with_limit(
        &mut self,
        signals: impl IntoSignals<S>,
        callback: CallbackRef<A>,
        max_calls: Option<usize>,
    ) -> ReceiverHandle<A> {
        let receiver = Arc::new(Receiver::new(callback, max_calls));
        let signals = signals.into_signals();

        for signal in &signals {
            self.receivers
                .entry(signal.clone())
                .or_default()
                .insert(receiver.id(), Arc::clone(&receiver));
        }

        debug!("Registered {} for signals {:?} (max calls: {:?})", receiver.id(), signals, max_calls);
        receiver
    }

    /// Whether `target` is registered for `signal`
    pub fn responds_to<T, Q>(&self, target: &T, signal: &Q) -> bool
    where
        T: Target<A> + ?Sized,
        S: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.receivers
            .get(signal)
            .map_or(false, |set| set.values().any(|receiver| target.matches(receiver)))
    }

    /// Every known signal `target` responds to
    ///
    /// Scans all signals the registry has ever seen.
    pub fn signals<T>(&self, target: &T) -> Vec<S>
    where
        T: Target<A> + ?Sized,
    {
        self.receivers
            .iter()
            .filter(|(_, set)| set.values().any(|receiver| target.matches(receiver)))
            .map(|(signal, _)| signal.clone())
            .collect()
    }

    /// Remove `target` from every signal it responds to
    ///
    /// Returns the number of registrations removed.
    pub fn disconnect<T>(&mut self, target: &T) -> usize
    where
        T: Target<A> + ?Sized,
    {
        let signals = self.signals(target);
        self.disconnect_from(target, signals)
    }

    /// Remove `target` from the given signals only
    ///
    /// Unknown signals and signals `target` is not registered for are
    /// skipped. Returns the number of registrations removed.
    pub fn disconnect_from<T>(&mut self, target: &T, signals: impl IntoSignals<S>) -> usize
    where
        T: Target<A> + ?Sized,
    {
        let mut removed = 0;
        for signal in signals.into_signals() {
            if let Some(set) = self.receivers.get_mut(&signal) {
                let before = set.len();
                set.retain(|_, receiver| !target.matches(receiver));
                let count = before - set.len();
                if count > 0 {
                    debug!("Disconnected {} receivers from signal {:?}", count, signal);
                }
                removed += count;
            }
        }
        removed
    }

    /// Remove every receiver of the given signals; the signals stay known
    pub fn clear(&mut self, signals: impl IntoSignals<S>) {
        for signal in signals.into_signals() {
            if let Some(set) = self.receivers.get_mut(&signal) {
                debug!("Cleared {} receivers from signal {:?}", set.len(), signal);
                set.clear();
            }
        }
    }

    /// Remove every receiver of every known signal
    pub fn clear_all(&mut self) {
        for set in self.receivers.values_mut() {
            set.clear();
        }
        debug!("Cleared receivers for all {} known signals", self.receivers.len());
    }

    /// Receivers currently registered for `signal`, in no particular order
    pub fn receivers<Q>(&self, signal: &Q) -> Vec<ReceiverHandle<A>>
    where
        S: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.receivers
            .get(signal)
            .map(|set| set.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn receiver_count<Q>(&self, signal: &Q) -> usize
    where
        S: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.receivers.get(signal).map_or(0, HashMap::len)
    }

    /// Every signal that has ever had a registration, including cleared ones
    pub fn known_signals(&self) -> Vec<S> {
        self.receivers.keys().cloned().collect()
    }

    /// True when no signal has any receiver
    pub fn is_empty(&self) -> bool {
        self.receivers.values().all(HashMap::is_empty)
    }

    /// Get delivery statistics
    pub fn stats(&self) -> DeliveryStats {
        self.stats.lock().clone()
    }

    pub fn clear_stats(&self) {
        *self.stats.lock() = DeliveryStats::default();
    }
}

impl<S, A> Default for SignalRegistry<S, A>
where
    S: SignalId,
    A: 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
