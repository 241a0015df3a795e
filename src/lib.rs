//! Simple in-process event signaling.
//!
//! Register callbacks against named signals and emit those signals to invoke
//! every registered callback synchronously. Use a
//! [`SignalRegistry`](signals::SignalRegistry) owned by your application, or
//! the process-wide registry behind the free functions re-exported here.
//!
//! ```
//! use smokesignal::{callback, Args};
//!
//! let on_ready = callback(|args: &Args| {
//!     assert_eq!(args.kw("attempt"), Some(&1.into()));
//!     Ok(())
//! });
//!
//! smokesignal::on("app-ready", on_ready.clone());
//! smokesignal::emit("app-ready", &Args::new().kwarg("attempt", 1)).unwrap();
//! assert!(smokesignal::responds_to(&on_ready, "app-ready"));
//!
//! smokesignal::disconnect(&on_ready);
//! assert!(smokesignal::signals(&on_ready).is_empty());
//! ```

pub mod config;
pub mod logging;
pub mod signals;

pub use signals::global::{
    clear, clear_all, configure, disconnect, disconnect_from, emit, on, on_with_limit, once, registrar,
    responds_to, signals, stats, with_registry,
};
pub use signals::{
    callback, Args, CallbackRef, CallbackResult, DeliveryPolicy, EmitSummary, ReceiverHandle, RegistryConfig,
    SignalError, SignalRegistry, SignalResult,
};
