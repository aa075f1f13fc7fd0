//! `mcrd shell` — Open a root shell inside the server container.

use anyhow::Context as _;
use mcrd_runtime::engine::Engine;

use super::Context;

/// Executes the `shell` command.
///
/// # Errors
///
/// Returns an error if the exec fails, typically because the server is not
/// running.
pub fn execute(ctx: &Context<'_>) -> anyhow::Result<()> {
    Engine::new(ctx.config, ctx.runner).shell().context(
        "unable to access container shell. Did you start the server? Or perhaps the server crashed?",
    )
}
