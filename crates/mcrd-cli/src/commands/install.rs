//! `mcrd install` — Resolve the server jar, write the build recipe, and
//! build the server image.

use anyhow::Context as _;
use mcrd_common::types::RootlessIdentity;
use mcrd_image::manifest::{self, HttpFetcher};
use mcrd_image::recipe::BuildRecipe;
use mcrd_runtime::engine::Engine;

use super::Context;

/// Executes the `install` command.
///
/// The rootless entry is validated before any network or file work. The
/// two manifest requests run on a current-thread runtime.
///
/// # Errors
///
/// Returns an error if the rootless entry is malformed, the version cannot
/// be resolved, the recipe cannot be written, or the build fails.
pub fn execute(ctx: &Context<'_>) -> anyhow::Result<()> {
    let identity = RootlessIdentity::parse(&ctx.config.rootless)?;

    let fetcher = HttpFetcher::new(ctx.config.manifest_timeout())?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let server_url = runtime
        .block_on(manifest::resolve_server_url(
            &fetcher,
            &ctx.config.manifest_url,
            &ctx.config.version,
        ))
        .context("installation failed")?;

    build(ctx, &identity, &server_url)
}

fn build(ctx: &Context<'_>, identity: &RootlessIdentity, server_url: &str) -> anyhow::Result<()> {
    BuildRecipe::render(ctx.config, identity, server_url)
        .write_to(&ctx.layout.recipe_path())
        .context("installation failed")?;
    Engine::new(ctx.config, ctx.runner)
        .build(ctx.layout.build_context())
        .context("docker image build failed")?;
    tracing::info!(tag = %ctx.config.build_tag, "installation completed");
    Ok(())
}
