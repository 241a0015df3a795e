//! Signal Registry
//!
//! In-process publish/subscribe signaling. Components register callbacks
//! against named signals; emitting a signal invokes every registered callback
//! synchronously on the caller's thread with the arguments given at emit time.
//!
//! # Architecture
//!
//! - **SignalRegistry**: maps each signal to its set of receivers
//! - **Receiver**: registration wrapper pairing a callback with its remaining-call counter
//! - **Dispatch**: snapshot of a signal's receivers, run once per emit
//! - **global**: one process-wide registry behind the crate-level free functions
//!
//! # Example Usage
//!
//! ```
//! use smokesignal::signals::{callback, Args, SignalRegistry};
//!
//! let mut registry: SignalRegistry = SignalRegistry::new();
//!
//! let greet = callback(|args: &Args| {
//!     println!("hello {}", args.kw("name").map(|v| v.to_string()).unwrap_or_default());
//!     Ok(())
//! });
//! registry.once(["ready", "started"], greet.clone());
//!
//! let summary = registry.emit("ready", &Args::new().kwarg("name", "world")).unwrap();
//! assert_eq!(summary.executed, 1);
//!
//! // Exhausted but still registered
//! registry.emit("started", &Args::new()).unwrap();
//! assert!(registry.responds_to(&greet, "started"));
//!
//! registry.disconnect(&greet);
//! assert!(registry.signals(&greet).is_empty());
//! ```

pub mod args;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod global;
pub mod receiver;
pub mod registrar;
pub mod registry;
pub mod signal_set;


// Re-export core types for convenience
pub use args::Args;
pub use config::{DeliveryPolicy, RegistryConfig};
pub use dispatch::{DeliveryStats, Dispatch, EmitSummary};
pub use error::{SignalError, SignalResult};
pub use receiver::{callback, Callback, CallbackRef, CallbackResult, Invocation, Receiver, ReceiverHandle, ReceiverId, Target};
pub use registrar::Registrar;
pub use registry::SignalRegistry;
pub use signal_set::{IntoSignals, SignalId};
