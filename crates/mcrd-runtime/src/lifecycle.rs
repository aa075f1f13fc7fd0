//! Multi-step lifecycle sequences that bracket engine calls with
//! ownership changes.

use mcrd_common::config::Config;
use mcrd_common::error::Result;
use mcrd_common::types::RootlessIdentity;

use crate::engine::Engine;
use crate::permission::Permissions;
use crate::process::ProcessRunner;

/// Composite operations on the managed instance.
pub struct Lifecycle<'a> {
    config: &'a Config,
    engine: Engine<'a>,
    permissions: Permissions<'a>,
}

impl<'a> Lifecycle<'a> {
    /// Creates the lifecycle manager for one configuration.
    #[must_use]
    pub fn new(config: &'a Config, runner: &'a dyn ProcessRunner) -> Self {
        Self {
            config,
            engine: Engine::new(config, runner),
            permissions: Permissions::new(config, runner),
        }
    }

    /// Starts the server.
    ///
    /// Validates the rootless entry, applies the SELinux label when enabled,
    /// hands the data directory to the rootless UID, then starts the
    /// container. Stops at the first failing step; a malformed rootless
    /// entry fails before any process runs.
    ///
    /// # Errors
    ///
    /// Returns the first step's error.
    pub fn launch(&self) -> Result<()> {
        let identity = RootlessIdentity::parse(&self.config.rootless)?;
        if self.config.selinux {
            self.permissions.relabel()?;
        }
        self.permissions.hand_off(&identity)?;
        self.engine.start()?;
        tracing::info!(name = %self.config.container_name, "server started");
        Ok(())
    }

    /// Stops the server and hands the data directory back to the host.
    ///
    /// # Errors
    ///
    /// Returns an error only if the stop itself fails.
    pub fn shutdown(&self) -> Result<()> {
        self.engine.stop()?;
        self.reclaim();
        tracing::info!(name = %self.config.container_name, "server stopped");
        Ok(())
    }

    /// Removes the container and hands the data directory back to the host.
    ///
    /// # Errors
    ///
    /// Returns an error only if the removal itself fails.
    pub fn retire(&self) -> Result<()> {
        self.engine.remove_container()?;
        self.reclaim();
        tracing::info!(name = %self.config.container_name, "server instance container removed");
        Ok(())
    }

    fn reclaim(&self) {
        if let Err(e) = self.permissions.reset() {
            tracing::warn!(
                error = %e,
                "you may have to reset file permissions manually to access server data"
            );
        }
    }
}
