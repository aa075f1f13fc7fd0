//! `mcrd reset-perm` — Hand the data directory back to the host.

use anyhow::Context as _;
use mcrd_runtime::permission::Permissions;

use super::Context;

/// Executes the `reset-perm` command.
///
/// # Errors
///
/// Returns an error if the ownership reset fails.
pub fn execute(ctx: &Context<'_>) -> anyhow::Result<()> {
    Permissions::new(ctx.config, ctx.runner)
        .reset()
        .context("file permission reset failed")
}

#[cfg(test)]
mod tests {
    use super::super::testing::Fixture;
    use super::*;

    #[test]
    fn resets_to_root_only() {
        let fixture = Fixture::new();
        execute(&fixture.context()).expect("reset failed");
        assert_eq!(
            fixture.runner.calls(),
            vec![format!("docker unshare chown -R 0:0 {}", fixture.data_dir())]
        );
    }

    #[test]
    fn reset_failure_is_a_command_failure() {
        let fixture = Fixture::failing_on("docker unshare");
        assert!(execute(&fixture.context()).is_err());
    }
}
