//! faultline core: error-event model, reporting seam, and the exception strategy.
//!
//! This crate defines the policy that turns an unhandled dispatch error into a
//! reported fault and a generic error view. It carries no HTTP or runtime
//! dependencies so any host dispatch loop can drive it.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `FaultlineError`/`Result` so a broken
//! reporter or template never takes the host process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod event;
pub mod listener;
pub mod report;
pub mod strategy;
pub mod template;

/// Shared result type.
pub use error::{FaultlineError, Result};

pub use event::{DispatchResult, ErrorCode, ErrorEvent, Fault, Outcome, Response, ViewModel};
pub use listener::{ErrorListener, Hook, ListenerRegistry};
pub use report::{ReportBus, ReportId, Reporter};
pub use strategy::{Decision, ExceptionStrategy, SkipReason, StrategyConfig};
pub use template::MessageTemplate;
