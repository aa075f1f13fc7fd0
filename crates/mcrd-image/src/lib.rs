//! Server image preparation for mcrd.
//!
//! Resolves a server version to its download URL and renders the build
//! recipe the container engine consumes.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod manifest;
pub mod recipe;
