//! Container engine subcommands against the single managed instance.
//!
//! The engine holds no knowledge of the container's state. Each call issues
//! the subcommand appropriate to the assumed state and reports its exit.

use std::path::Path;

use mcrd_common::config::Config;
use mcrd_common::constants::CONTAINER_INSTANCE_DIR;
use mcrd_common::error::Result;

use crate::process::{Invocation, ProcessRunner, run_checked};

/// Issues engine subcommands for the configured container and image.
pub struct Engine<'a> {
    config: &'a Config,
    runner: &'a dyn ProcessRunner,
}

impl<'a> Engine<'a> {
    /// Creates an engine bound to one configuration.
    #[must_use]
    pub fn new(config: &'a Config, runner: &'a dyn ProcessRunner) -> Self {
        Self { config, runner }
    }

    fn invocation<I, S>(&self, args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation::new(&self.config.engine).args(args)
    }

    fn run<I, S>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        run_checked(self.runner, &self.invocation(args))
    }

    /// Builds the image from the recipe in `context`.
    ///
    /// # Errors
    ///
    /// Returns an error if the build command fails.
    pub fn build(&self, context: &Path) -> Result<()> {
        tracing::info!(tag = %self.config.build_tag, "building image");
        let dir = context.display().to_string();
        let inv = self
            .invocation(["build", "--tag", self.config.build_tag.as_str(), dir.as_str()])
            .current_dir(context);
        run_checked(self.runner, &inv)
    }

    /// Creates the container with its port mapping and data mount.
    ///
    /// # Errors
    ///
    /// Returns an error if the create command fails.
    pub fn create(&self) -> Result<()> {
        let c = self.config;
        tracing::info!(name = %c.container_name, "creating container");
        let port = format!("{}:{}", c.server_port, c.server_port);
        let volume = format!("{}:{CONTAINER_INSTANCE_DIR}:z", c.data_dir.display());
        let image = format!("localhost/{}", c.build_tag);
        self.run([
            "create",
            "-i",
            "--name",
            c.container_name.as_str(),
            "-p",
            port.as_str(),
            "-v",
            volume.as_str(),
            image.as_str(),
        ])
    }

    /// Starts the container.
    ///
    /// # Errors
    ///
    /// Returns an error if the start command fails.
    pub fn start(&self) -> Result<()> {
        self.run(["start", self.config.container_name.as_str()])
    }

    /// Attaches the terminal to the container's console.
    ///
    /// # Errors
    ///
    /// Returns an error if the attach command fails.
    pub fn attach(&self) -> Result<()> {
        self.run(["attach", self.config.container_name.as_str()])
    }

    /// Opens an interactive root shell inside the container.
    ///
    /// # Errors
    ///
    /// Returns an error if the exec command fails.
    pub fn shell(&self) -> Result<()> {
        self.run(["exec", "-itu", "root", self.config.container_name.as_str(), "/bin/sh"])
    }

    /// Stops the container.
    ///
    /// # Errors
    ///
    /// Returns an error if the stop command fails.
    pub fn stop(&self) -> Result<()> {
        self.run(["stop", self.config.container_name.as_str()])
    }

    /// Removes the container.
    ///
    /// # Errors
    ///
    /// Returns an error if the remove command fails.
    pub fn remove_container(&self) -> Result<()> {
        self.run(["container", "rm", self.config.container_name.as_str()])
    }

    /// Removes the built image.
    ///
    /// # Errors
    ///
    /// Returns an error if the image remove command fails.
    pub fn remove_image(&self) -> Result<()> {
        self.run(["image", "rm", self.config.build_tag.as_str()])
    }

    /// Recursively changes the data directory's owner inside the engine's
    /// user namespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the chown fails.
    pub fn unshare_chown(&self, owner: &str) -> Result<()> {
        let dir = self.config.data_dir.display().to_string();
        self.run(["unshare", "chown", "-R", owner, dir.as_str()])
    }
}
