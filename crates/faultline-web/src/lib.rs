//! faultline web host library entry.
//!
//! Wires config, the exception strategy, reporters, and the view renderer
//! into an axum application. Consumed by the binary (`main.rs`) and by
//! integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod app_state;
pub mod config;
pub mod failure;
pub mod handlers;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod router;
