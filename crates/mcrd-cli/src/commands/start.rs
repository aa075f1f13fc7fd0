//! `mcrd start` — Hand the data directory to the container and start it.

use anyhow::Context as _;
use mcrd_runtime::lifecycle::Lifecycle;

use super::Context;

/// Executes the `start` command.
///
/// # Errors
///
/// Returns an error if labelling, the permission hand-off, or the start
/// fails.
pub fn execute(ctx: &Context<'_>) -> anyhow::Result<()> {
    Lifecycle::new(ctx.config, ctx.runner)
        .launch()
        .context("server launch failed")
}
