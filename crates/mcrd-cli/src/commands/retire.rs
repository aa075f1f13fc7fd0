//! `mcrd retire` — Remove the server container.

use anyhow::Context as _;
use mcrd_runtime::lifecycle::Lifecycle;

use super::Context;

/// Executes the `retire` command.
///
/// # Errors
///
/// Returns an error if the container cannot be removed.
pub fn execute(ctx: &Context<'_>) -> anyhow::Result<()> {
    Lifecycle::new(ctx.config, ctx.runner)
        .retire()
        .context("unable to remove the server instance container")
}
