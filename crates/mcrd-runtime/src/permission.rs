//! Ownership toggling of the instance data directory.
//!
//! The data directory is owned by the rootless UID while the container
//! uses it and by UID 0 while the host does. The chowns run inside the
//! engine's user namespace so an unprivileged operator can issue them.

use mcrd_common::config::Config;
use mcrd_common::constants::{HOST_OWNER, SANDBOX_FILE_LABEL};
use mcrd_common::error::Result;
use mcrd_common::types::RootlessIdentity;

use crate::engine::Engine;
use crate::process::{Invocation, ProcessRunner, run_checked};

/// Applies ownership and security-label changes to the data directory.
pub struct Permissions<'a> {
    config: &'a Config,
    runner: &'a dyn ProcessRunner,
}

impl<'a> Permissions<'a> {
    /// Creates a coordinator bound to one configuration.
    #[must_use]
    pub fn new(config: &'a Config, runner: &'a dyn ProcessRunner) -> Self {
        Self { config, runner }
    }

    /// Hands the data directory to the container's rootless UID.
    ///
    /// # Errors
    ///
    /// Returns an error if the chown fails.
    pub fn hand_off(&self, identity: &RootlessIdentity) -> Result<()> {
        tracing::info!(uid = identity.uid(), "setting up file permissions");
        Engine::new(self.config, self.runner).unshare_chown(&identity.uid().to_string())?;
        tracing::info!("file permissions set up");
        Ok(())
    }

    /// Hands the data directory back to UID 0 for host access.
    ///
    /// # Errors
    ///
    /// Returns an error if the chown fails.
    pub fn reset(&self) -> Result<()> {
        tracing::info!(dir = %self.config.data_dir.display(), "resetting file permissions");
        Engine::new(self.config, self.runner).unshare_chown(HOST_OWNER)?;
        tracing::info!("file permissions reset");
        Ok(())
    }

    /// Resets ownership, then applies the sandbox SELinux label recursively.
    ///
    /// # Errors
    ///
    /// Returns an error if the reset or the relabel fails.
    pub fn relabel(&self) -> Result<()> {
        tracing::info!("setting up SELinux labels");
        self.reset()?;
        let inv = Invocation::new("chcon")
            .args(["-Rt", SANDBOX_FILE_LABEL])
            .arg(self.config.data_dir.display().to_string());
        run_checked(self.runner, &inv)?;
        tracing::info!("SELinux labels applied");
        Ok(())
    }
}
