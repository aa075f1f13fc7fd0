//! # mcrd — Minecraft Rootless Docker Operator
//!
//! Builds a server image, then creates, starts, stops, and retires a single
//! container instance, keeping the data directory's owner in step.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

mod commands;

use std::process::ExitCode;

use clap::Parser;
use mcrd_common::config::InstallLayout;
use mcrd_runtime::process::SystemRunner;

use crate::commands::Cli;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let layout = match InstallLayout::detect() {
        Ok(layout) => layout,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    ExitCode::from(commands::run(
        cli.verb.as_deref(),
        cli.conf.as_deref(),
        &layout,
        &SystemRunner,
    ))
}
