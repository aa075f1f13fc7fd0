//! `mcrd help` — Print usage.

use mcrd_common::constants::{APP_NAME, BIN_NAME, CONFIG_FILE_NAME, HOMEPAGE};

use super::Context;

const VERBS: &[(&str, &str)] = &[
    ("install", "Install a server by building a docker image."),
    ("create", "Create a server instance (docker container)."),
    ("start", "Start the server."),
    ("console", "Access the server console."),
    ("shell", "Access server container shell (as container root)."),
    ("stop", "(DEPRECATED! Use `console` if possible!) Force the server to stop."),
    ("reset-perm", "Reset the server instance directory permissions for host access."),
    ("retire", "Remove the server instance."),
    ("uninstall", "Uninstall the server image from docker."),
];

fn usage() -> String {
    let mut text = format!(
        "{APP_NAME} v{}\n {HOMEPAGE}\n\nUsage: {BIN_NAME} <command> [--conf </path/to/{CONFIG_FILE_NAME}>]\n",
        env!("CARGO_PKG_VERSION")
    );
    for (verb, summary) in VERBS {
        text.push_str(&format!("  {verb:<12} - {summary}\n"));
    }
    text.push_str(&format!(
        "\nCheck (and edit if needed) `{CONFIG_FILE_NAME}` before launching this tool!"
    ));
    text
}

/// Executes the `help` command.
///
/// # Errors
///
/// Never fails.
#[allow(clippy::print_stdout, clippy::unnecessary_wraps)]
pub fn execute(_ctx: &Context<'_>) -> anyhow::Result<()> {
    println!("{}", usage());
    Ok(())
}
