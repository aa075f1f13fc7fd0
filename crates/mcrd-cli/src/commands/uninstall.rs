//! `mcrd uninstall` — Remove the server image.

use anyhow::Context as _;
use mcrd_runtime::engine::Engine;

use super::Context;

/// Executes the `uninstall` command.
///
/// # Errors
///
/// Returns an error if the image cannot be removed, usually because a
/// container still uses it.
pub fn execute(ctx: &Context<'_>) -> anyhow::Result<()> {
    Engine::new(ctx.config, ctx.runner).remove_image().context(
        "unable to remove the server image. Stop the server and remove the container with `retire` first",
    )?;
    tracing::info!(tag = %ctx.config.build_tag, "server image removed");
    Ok(())
}
