//! Signal Registry Error Types
//!
//! The registry itself never fails: absent signals and unknown callbacks are
//! no-ops. The only error is a callback failing during delivery.

use thiserror::Error;

/// Result type for signal operations
pub type SignalResult<T> = Result<T, SignalError>;

/// Errors that can occur while emitting a signal
#[derive(Debug, Error)]
pub enum SignalError {
    /// A callback returned an error and delivery was aborted
    #[error("Callback for signal {signal} failed: {source}")]
    CallbackFailed {
        /// `Debug` rendering of the signal, so string signals keep their quotes
        signal: String,
        #[source]
        source: anyhow::Error,
    },
}

impl SignalError {
    /// Create a callback failed error
    pub fn callback_failed(signal: impl Into<String>, source: anyhow::Error) -> Self {
        Self::CallbackFailed {
            signal: signal.into(),
            source,
        }
    }

    /// Signal being emitted when the error occurred, in its `Debug` form
    ///
    /// A `String` signal `ready` is reported as `"ready"` including the
    /// quotes, which keeps non-string signal types unambiguous.
    pub fn signal(&self) -> &str {
        match self {
            Self::CallbackFailed { signal, .. } => signal,
        }
    }

    /// The error exactly as the callback returned it
    pub fn callback_error(&self) -> &anyhow::Error {
        match self {
            Self::CallbackFailed { source, .. } => source,
        }
    }

    /// Unwrap into the callback's own error
    pub fn into_callback_error(self) -> anyhow::Error {
        match self {
            Self::CallbackFailed { source, .. } => source,
        }
    }
}
