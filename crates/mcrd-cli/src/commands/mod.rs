//! CLI argument definitions and verb dispatch.

pub mod console;
pub mod create;
pub mod help;
pub mod install;
pub mod reset_perm;
pub mod retire;
pub mod shell;
pub mod start;
pub mod stop;
pub mod uninstall;

#[cfg(test)]
mod testing;

use std::path::{Path, PathBuf};

use clap::Parser;
use mcrd_common::config::{self, Config, InstallLayout};
use mcrd_runtime::process::ProcessRunner;

/// mcrd — operate a rootless containerized Minecraft server.
#[derive(Parser, Debug)]
#[command(name = "mcrd", version, about, long_about = None)]
pub struct Cli {
    /// Verb to run (see `mcrd help`). Unknown or missing verbs show help.
    pub verb: Option<String>,

    /// Path to the configuration file.
    #[arg(long, value_name = "PATH")]
    pub conf: Option<PathBuf>,

    /// Extra arguments after the verb are ignored.
    #[arg(hide = true)]
    pub rest: Vec<String>,
}

/// Everything a verb needs, constructed once at program entry.
pub struct Context<'a> {
    /// Loaded configuration.
    pub config: &'a Config,
    /// Install directory layout.
    pub layout: &'a InstallLayout,
    /// Runner for external processes.
    pub runner: &'a dyn ProcessRunner,
}

/// Top-level operations selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// Print usage.
    Help,
    /// Build the server image.
    Install,
    /// Create the container.
    Create,
    /// Start the server.
    Start,
    /// Attach to the server console.
    Console,
    /// Stop the server.
    Stop,
    /// Hand the data directory back to the host.
    ResetPerm,
    /// Remove the container.
    Retire,
    /// Open a root shell in the container.
    Shell,
    /// Remove the server image.
    Uninstall,
}

impl Verb {
    /// Looks up a verb, ignoring ASCII case.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let verb = match name.to_ascii_lowercase().as_str() {
            "help" => Self::Help,
            "install" => Self::Install,
            "create" => Self::Create,
            "start" => Self::Start,
            "console" => Self::Console,
            "stop" => Self::Stop,
            "reset-perm" => Self::ResetPerm,
            "retire" => Self::Retire,
            "shell" => Self::Shell,
            "uninstall" => Self::Uninstall,
            _ => return None,
        };
        Some(verb)
    }

    fn execute(self, ctx: &Context<'_>) -> anyhow::Result<()> {
        match self {
            Self::Help => help::execute(ctx),
            Self::Install => install::execute(ctx),
            Self::Create => create::execute(ctx),
            Self::Start => start::execute(ctx),
            Self::Console => console::execute(ctx),
            Self::Stop => stop::execute(ctx),
            Self::ResetPerm => reset_perm::execute(ctx),
            Self::Retire => retire::execute(ctx),
            Self::Shell => shell::execute(ctx),
            Self::Uninstall => uninstall::execute(ctx),
        }
    }
}

/// Runs the requested verb and returns the process exit code.
///
/// Missing or unrecognized verbs run `help`.
pub fn dispatch(verb: Option<&str>, ctx: &Context<'_>) -> u8 {
    let verb = verb.and_then(Verb::parse).unwrap_or(Verb::Help);
    tracing::debug!(?verb, "dispatching");
    match verb.execute(ctx) {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!("{e:#}");
            1
        }
    }
}

/// Loads the configuration, then dispatches the verb.
///
/// A configuration that fails to load exits 1 without running any verb.
pub fn run(
    verb: Option<&str>,
    conf: Option<&Path>,
    layout: &InstallLayout,
    runner: &dyn ProcessRunner,
) -> u8 {
    let config = match config::load(conf, layout) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("unable to load configuration: {e}");
            return 1;
        }
    };

    let ctx = Context {
        config: &config,
        layout,
        runner,
    };
    dispatch(verb, &ctx)
}
