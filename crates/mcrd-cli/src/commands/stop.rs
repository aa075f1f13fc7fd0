//! `mcrd stop` — Force the server to stop and reclaim the data directory.

use anyhow::Context as _;
use mcrd_runtime::lifecycle::Lifecycle;

use super::Context;

/// Executes the `stop` command.
///
/// A failed permission reset afterwards is only a warning.
///
/// # Errors
///
/// Returns an error if the container cannot be stopped.
pub fn execute(ctx: &Context<'_>) -> anyhow::Result<()> {
    Lifecycle::new(ctx.config, ctx.runner)
        .shutdown()
        .context("unable to stop the server")
}
