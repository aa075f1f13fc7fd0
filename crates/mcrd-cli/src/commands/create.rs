//! `mcrd create` — Create the server container.

use anyhow::Context as _;
use mcrd_runtime::engine::Engine;

use super::Context;

/// Executes the `create` command.
///
/// # Errors
///
/// Returns an error if container creation fails.
pub fn execute(ctx: &Context<'_>) -> anyhow::Result<()> {
    Engine::new(ctx.config, ctx.runner)
        .create()
        .context("container creation failed")?;
    tracing::info!(name = %ctx.config.container_name, "container created");
    Ok(())
}
