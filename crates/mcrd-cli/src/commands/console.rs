//! `mcrd console` — Attach to the server console.

use anyhow::Context as _;
use mcrd_runtime::engine::Engine;

use super::Context;

/// Executes the `console` command.
///
/// # Errors
///
/// Returns an error if the attach fails, typically because the server is
/// not running.
pub fn execute(ctx: &Context<'_>) -> anyhow::Result<()> {
    Engine::new(ctx.config, ctx.runner).attach().context(
        "unable to attach the server console. Did you start the server? Or perhaps the server crashed?",
    )
}
