//! Shared fixtures for verb tests.

use std::sync::Mutex;

use mcrd_common::config::{Config, InstallLayout};
use mcrd_common::error::Result;
use mcrd_runtime::process::{ExitStatus, Invocation, ProcessRunner};

use super::Context;

/// Records invocations; those starting with a failing prefix exit 1.
#[derive(Default)]
pub struct RecordingRunner {
    failing: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl RecordingRunner {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ProcessRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> Result<ExitStatus> {
        let line = invocation.to_string();
        let fails = self
            .failing
            .as_deref()
            .is_some_and(|prefix| line.starts_with(prefix));
        self.calls.lock().unwrap().push(line);
        Ok(ExitStatus::from_code(i32::from(fails)))
    }
}

/// A temporary install directory with default configuration.
pub struct Fixture {
    pub dir: tempfile::TempDir,
    pub layout: InstallLayout,
    pub config: Config,
    pub runner: RecordingRunner,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let layout = InstallLayout::new(dir.path());
        let config = Config::defaults(&layout);
        Self {
            dir,
            layout,
            config,
            runner: RecordingRunner::default(),
        }
    }

    pub fn failing_on(prefix: &str) -> Self {
        let mut fixture = Self::new();
        fixture.runner.failing = Some(prefix.to_string());
        fixture
    }

    pub fn context(&self) -> Context<'_> {
        Context {
            config: &self.config,
            layout: &self.layout,
            runner: &self.runner,
        }
    }

    pub fn data_dir(&self) -> String {
        self.config.data_dir.display().to_string()
    }
}
