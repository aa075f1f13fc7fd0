//! Lifecycle sequences driven through a recording process runner.
//!
//! Verifies step ordering, abort-on-failure, and the downgraded permission
//! reset after stop and retire.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Mutex;

use mcrd_common::config::{Config, InstallLayout};
use mcrd_common::error::{McrdError, Result};
use mcrd_runtime::lifecycle::Lifecycle;
use mcrd_runtime::process::{ExitStatus, Invocation, ProcessRunner};

const DIR: &str = "/srv/mcrd/minecraft-server";
const RESET: &str = "docker unshare chown -R 0:0 /srv/mcrd/minecraft-server";
const RELABEL: &str = "chcon -Rt svirt_sandbox_file_t /srv/mcrd/minecraft-server";
const HAND_OFF: &str = "docker unshare chown -R 1024 /srv/mcrd/minecraft-server";
const START: &str = "docker start mc-server";

/// Records every invocation and fails those whose command line starts with
/// one of the configured prefixes.
#[derive(Default)]
struct ScriptedRunner {
    failing: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    fn failing_on(prefix: &str) -> Self {
        Self {
            failing: vec![prefix.to_string()],
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ProcessRunner for ScriptedRunner {
    fn run(&self, invocation: &Invocation) -> Result<ExitStatus> {
        let line = invocation.to_string();
        let fails = self.failing.iter().any(|p| line.starts_with(p.as_str()));
        self.calls.lock().unwrap().push(line);
        Ok(ExitStatus::from_code(i32::from(fails)))
    }
}

fn config(selinux: bool) -> Config {
    let mut config = Config::defaults(&InstallLayout::new("/srv/mcrd"));
    assert_eq!(config.data_dir.to_str(), Some(DIR));
    config.selinux = selinux;
    config
}

// ── launch ───────────────────────────────────────────────────────────

#[test]
fn launch_with_selinux_runs_steps_in_order() {
    let config = config(true);
    let runner = ScriptedRunner::default();
    Lifecycle::new(&config, &runner).launch().expect("launch failed");
    assert_eq!(runner.calls(), vec![RESET, RELABEL, HAND_OFF, START]);
}

#[test]
fn launch_without_selinux_skips_label() {
    let config = config(false);
    let runner = ScriptedRunner::default();
    Lifecycle::new(&config, &runner).launch().expect("launch failed");
    assert_eq!(runner.calls(), vec![HAND_OFF, START]);
}

#[test]
fn launch_aborts_when_hand_off_fails() {
    let config = config(true);
    let runner = ScriptedRunner::failing_on(HAND_OFF);
    let err = Lifecycle::new(&config, &runner)
        .launch()
        .expect_err("should fail");
    assert!(matches!(err, McrdError::CommandFailed { .. }));
    assert_eq!(runner.calls(), vec![RESET, RELABEL, HAND_OFF]);
}

#[test]
fn launch_aborts_when_relabel_fails() {
    let config = config(true);
    let runner = ScriptedRunner::failing_on("chcon");
    assert!(Lifecycle::new(&config, &runner).launch().is_err());
    assert_eq!(runner.calls(), vec![RESET, RELABEL]);
}

#[test]
fn launch_with_malformed_rootless_never_starts() {
    let mut config = config(false);
    config.rootless = "gameserver".into();
    let runner = ScriptedRunner::default();
    assert!(matches!(
        Lifecycle::new(&config, &runner).launch(),
        Err(McrdError::InvalidRootless { .. })
    ));
    assert!(runner.calls().is_empty());
}

#[test]
fn launch_with_selinux_and_malformed_rootless_runs_nothing() {
    let mut config = config(true);
    config.rootless = "gameserver".into();
    let runner = ScriptedRunner::default();
    assert!(matches!(
        Lifecycle::new(&config, &runner).launch(),
        Err(McrdError::InvalidRootless { .. })
    ));
    assert!(runner.calls().is_empty());
}

#[test]
fn launch_reports_start_failure() {
    let config = config(false);
    let runner = ScriptedRunner::failing_on(START);
    assert!(Lifecycle::new(&config, &runner).launch().is_err());
    assert_eq!(runner.calls(), vec![HAND_OFF, START]);
}

// ── shutdown / retire ────────────────────────────────────────────────

#[test]
fn shutdown_resets_permissions_after_stop() {
    let config = config(true);
    let runner = ScriptedRunner::default();
    Lifecycle::new(&config, &runner).shutdown().expect("shutdown failed");
    assert_eq!(runner.calls(), vec!["docker stop mc-server", RESET]);
}

#[test]
fn shutdown_succeeds_when_reset_fails() {
    let config = config(true);
    let runner = ScriptedRunner::failing_on(RESET);
    Lifecycle::new(&config, &runner)
        .shutdown()
        .expect("reset failure must not fail shutdown");
    assert_eq!(runner.calls(), vec!["docker stop mc-server", RESET]);
}

#[test]
fn shutdown_failure_skips_reset() {
    let config = config(true);
    let runner = ScriptedRunner::failing_on("docker stop");
    assert!(Lifecycle::new(&config, &runner).shutdown().is_err());
    assert_eq!(runner.calls(), vec!["docker stop mc-server"]);
}

#[test]
fn retire_resets_permissions_after_remove() {
    let config = config(false);
    let runner = ScriptedRunner::default();
    Lifecycle::new(&config, &runner).retire().expect("retire failed");
    assert_eq!(runner.calls(), vec!["docker container rm mc-server", RESET]);
}

#[test]
fn retire_succeeds_when_reset_fails() {
    let config = config(false);
    let runner = ScriptedRunner::failing_on(RESET);
    assert!(Lifecycle::new(&config, &runner).retire().is_ok());
    assert_eq!(runner.calls(), vec!["docker container rm mc-server", RESET]);
}

#[test]
fn retire_failure_skips_reset() {
    let config = config(false);
    let runner = ScriptedRunner::failing_on("docker container rm");
    assert!(Lifecycle::new(&config, &runner).retire().is_err());
    assert_eq!(runner.calls().len(), 1);
}
