//! Signal Delivery
//!
//! A [`Dispatch`] is a snapshot of the receivers registered for one signal at
//! the moment of emit. Running it invokes each receiver in turn on the
//! caller's thread. Taking the snapshot first means the registry is free to
//! change while callbacks run.

use std::sync::Arc;
use std::time::Instant;

use log::{debug, trace, warn};
use parking_lot::Mutex;

use crate::signals::config::DeliveryPolicy;
use crate::signals::error::{SignalError, SignalResult};
use crate::signals::receiver::{Invocation, ReceiverHandle};

/// Outcome of a single emit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitSummary {
    /// Receivers invoked, including exhausted ones
    pub delivered: usize,

    /// Underlying callbacks that actually ran
    pub executed: usize,

    /// Callbacks that returned an error (subset of `executed`)
    pub failed: usize,
}

impl EmitSummary {
    /// Receivers whose call limit was already used up
    pub fn skipped(&self) -> usize {
        self.delivered - self.executed
    }
}

/// Cumulative delivery statistics for a registry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryStats {
    /// Total emit calls
    pub signals_emitted: u64,

    /// Total receivers invoked
    pub receivers_invoked: u64,

    /// Total callbacks that actually ran
    pub callbacks_executed: u64,

    /// Total callback failures
    pub callback_failures: u64,
}

impl DeliveryStats {
    fn record(&mut self, summary: &EmitSummary) {
        self.signals_emitted += 1;
        self.receivers_invoked += summary.delivered as u64;
        self.callbacks_executed += summary.executed as u64;
        self.callback_failures += summary.failed as u64;
    }
}

/// Receivers captured for one emit
pub struct Dispatch<A> {
    signal: String,
    receivers: Vec<ReceiverHandle<A>>,
    policy: DeliveryPolicy,
    stats: Arc<Mutex<DeliveryStats>>,
}

impl<A> Dispatch<A> {
    pub(crate) fn new(
        signal: String,
        receivers: Vec<ReceiverHandle<A>>,
        policy: DeliveryPolicy,
        stats: Arc<Mutex<DeliveryStats>>,
    ) -> Self {
        Self {
            signal,
            receivers,
            policy,
            stats,
        }
    }

    /// Rendered signal identifier
    pub fn signal(&self) -> &str {
        &self.signal
    }

    /// Number of receivers that will be invoked
    pub fn len(&self) -> usize {
        self.receivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receivers.is_empty()
    }

    /// Invoke every captured receiver with `args`
    pub fn run(self, args: &A) -> SignalResult<EmitSummary> {
        let start_time = Instant::now();
        let mut summary = EmitSummary::default();

        let outcome = self.deliver(args, &mut summary);
        self.stats.lock().record(&summary);

        debug!(
            "Emitted signal {} to {} receivers ({} executed, {} failed) in {:?}",
            self.signal,
            summary.delivered,
            summary.executed,
            summary.failed,
            start_time.elapsed()
        );

        outcome.map(|()| summary)
    }

    fn deliver(&self, args: &A, summary: &mut EmitSummary) -> SignalResult<()> {
        for receiver in &self.receivers {
            summary.delivered += 1;
            match receiver.invoke(args) {
                Ok(Invocation::Executed) => {
                    summary.executed += 1;
                }
                Ok(Invocation::Skipped) => {
                    trace!("{} for signal {} has no calls left", receiver.id(), self.signal);
                }
                Err(error) => {
                    summary.executed += 1;
                    summary.failed += 1;
                    match self.policy {
                        DeliveryPolicy::FailFast => {
                            return Err(SignalError::callback_failed(self.signal.clone(), error));
                        }
                        DeliveryPolicy::Isolate => {
                            warn!("{} failed handling signal {}: {:#}", receiver.id(), self.signal, error);
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
