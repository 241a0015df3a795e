//! Callbacks and Registration Wrappers
//!
//! A [`Receiver`] pairs the original callback with an optional remaining-call
//! counter. The registry stores receivers, never bare callbacks, and matches
//! them against a [`Target`] when answering queries or disconnecting.

use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

/// Result returned by every callback
pub type CallbackResult = anyhow::Result<()>;

/// A unit of behavior invoked when a signal is emitted
pub trait Callback<A>: Send + Sync {
    fn call(&self, args: &A) -> CallbackResult;
}

impl<A, F> Callback<A> for F
where
    F: Fn(&A) -> CallbackResult + Send + Sync,
{
    fn call(&self, args: &A) -> CallbackResult {
        self(args)
    }
}

/// Shared reference to a callback; the allocation is its identity
pub type CallbackRef<A> = Arc<dyn Callback<A>>;

/// Handle to a registration, as returned by `on`/`once`
pub type ReceiverHandle<A> = Arc<Receiver<A>>;

/// Wrap a closure as a [`CallbackRef`]
///
/// Keep the returned reference to later query or disconnect every
/// registration made with it.
pub fn callback<A, F>(f: F) -> CallbackRef<A>
where
    A: 'static,
    F: Fn(&A) -> CallbackResult + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Unique identifier of a registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReceiverId(u64);

impl ReceiverId {
    fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ReceiverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "receiver-{}", self.0)
    }
}

/// Outcome of invoking a receiver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    /// The underlying callback ran
    Executed,

    /// The call limit was already reached
    Skipped,
}

/// Registration wrapper around a callback
pub struct Receiver<A> {
    id: ReceiverId,
    callback: CallbackRef<A>,
    max_calls: Option<usize>,
    remaining: Option<AtomicUsize>,
}

impl<A> Receiver<A> {
    pub(crate) fn new(callback: CallbackRef<A>, max_calls: Option<usize>) -> Self {
        Self {
            id: ReceiverId::next(),
            callback,
            max_calls,
            remaining: max_calls.map(AtomicUsize::new),
        }
    }

    pub fn id(&self) -> ReceiverId {
        self.id
    }

    /// The original callback
    pub fn callback(&self) -> &CallbackRef<A> {
        &self.callback
    }

    /// Call limit given at registration; `None` is unlimited
    pub fn max_calls(&self) -> Option<usize> {
        self.max_calls
    }

    pub fn remaining_calls(&self) -> Option<usize> {
        self.remaining.as_ref().map(|remaining| remaining.load(Ordering::Acquire))
    }

    /// True once a limited receiver has used up its calls
    pub fn is_exhausted(&self) -> bool {
        self.remaining_calls() == Some(0)
    }

    /// Whether this receiver wraps `callback`
    pub fn wraps(&self, callback: &CallbackRef<A>) -> bool {
        same_allocation(&self.callback, callback)
    }

    /// Take one call from the counter, failing when none are left
    fn claim_call(&self) -> bool {
        match &self.remaining {
            None => true,
            Some(remaining) => remaining
                .fetch_update(Ordering::AcqRel, Ordering::Acquire, |left| left.checked_sub(1))
                .is_ok(),
        }
    }

    /// Invoke the wrapped callback unless the call limit has been reached
    ///
    /// The counter is consumed before the callback runs, so a failing call
    /// still counts against the limit.
    pub fn invoke(&self, args: &A) -> anyhow::Result<Invocation> {
        if !self.claim_call() {
            return Ok(Invocation::Skipped);
        }
        self.callback.call(args)?;
        Ok(Invocation::Executed)
    }
}

impl<A> fmt::Debug for Receiver<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Receiver")
            .field("id", &self.id)
            .field("max_calls", &self.max_calls)
            .field("remaining", &self.remaining_calls())
            .finish_non_exhaustive()
    }
}

fn same_allocation<T: ?Sized, U: ?Sized>(a: &Arc<T>, b: &Arc<U>) -> bool {
    std::ptr::eq(Arc::as_ptr(a).cast::<()>(), Arc::as_ptr(b).cast::<()>())
}

/// Something a registration can be matched against
///
/// A [`CallbackRef`] matches every receiver wrapping that callback; a
/// [`ReceiverHandle`] matches only that registration.
pub trait Target<A> {
    fn matches(&self, receiver: &Receiver<A>) -> bool;
}

impl<A> Target<A> for Arc<dyn Callback<A>> {
    fn matches(&self, receiver: &Receiver<A>) -> bool {
        receiver.wraps(self)
    }
}

impl<A> Target<A> for Arc<Receiver<A>> {
    fn matches(&self, receiver: &Receiver<A>) -> bool {
        std::ptr::eq(Arc::as_ptr(self), receiver)
    }
}
