//! Deferred registration
//!
//! A [`Registrar`] captures the signals and call limit up front and attaches
//! callbacks later, one or many times.

use crate::signals::receiver::{CallbackRef, ReceiverHandle};
use crate::signals::registry::SignalRegistry;
use crate::signals::signal_set::{IntoSignals, SignalId};

/// Signals and call limit waiting for a callback
#[derive(Debug, Clone, PartialEq)]
pub struct Registrar<S = String> {
    signals: Vec<S>,
    max_calls: Option<usize>,
}

impl<S: SignalId> Registrar<S> {
    /// Registrar for one or more signals with no call limit
    pub fn new(signals: impl IntoSignals<S>) -> Self {
        Self {
            signals: signals.into_signals(),
            max_calls: None,
        }
    }

    /// Limit each registration to `max_calls` executions
    pub fn max_calls(mut self, max_calls: usize) -> Self {
        self.max_calls = Some(max_calls);
        self
    }

    /// Limit each registration to a single execution
    pub fn once(self) -> Self {
        self.max_calls(1)
    }

    pub fn signals(&self) -> &[S] {
        &self.signals
    }

    pub fn limit(&self) -> Option<usize> {
        self.max_calls
    }

    /// Register `callback` on `registry`
    ///
    /// Same as calling `on_with_limit` with the captured signals and limit.
    pub fn register<A: 'static>(
        &self,
        registry: &mut SignalRegistry<S, A>,
        callback: CallbackRef<A>,
    ) -> ReceiverHandle<A> {
        registry.on_with_limit(self.signals.clone(), callback, self.max_calls)
    }
}
