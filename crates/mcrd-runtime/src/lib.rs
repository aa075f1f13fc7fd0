//! Server instance lifecycle management for mcrd.
//!
//! Every operation is a synchronous external process invocation routed
//! through a [`process::ProcessRunner`], so tests can substitute a fake.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod engine;
pub mod lifecycle;
pub mod permission;
pub mod process;
