//! External process invocation.
//!
//! Invocations always inherit the caller's standard streams, so interactive
//! sessions behave as a direct passthrough terminal.

use std::fmt;
use std::path::PathBuf;

use mcrd_common::error::{McrdError, Result};

/// A program and its argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program name, resolved on `PATH`.
    pub program: String,
    /// Arguments passed verbatim.
    pub args: Vec<String>,
    /// Working directory. `None` keeps the caller's.
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    /// Creates an invocation of `program`.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Appends one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets the working directory.
    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Exit status of a finished process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatus {
    /// Exit code, `None` when terminated by a signal.
    pub code: Option<i32>,
}

impl ExitStatus {
    /// Status of a process that exited with `code`.
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// Returns whether the process exited with status 0.
    #[must_use]
    pub const fn success(self) -> bool {
        matches!(self.code, Some(0))
    }
}

/// Runs external processes to completion.
pub trait ProcessRunner: Send + Sync {
    /// Runs the invocation and waits for it to exit.
    ///
    /// # Errors
    ///
    /// Returns an error if the program is missing or cannot be launched.
    /// A non-zero exit is reported through the returned status.
    fn run(&self, invocation: &Invocation) -> Result<ExitStatus>;
}

/// Runner that spawns real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<ExitStatus> {
        let program =
            which::which(&invocation.program).map_err(|_| McrdError::ProgramNotFound {
                program: invocation.program.clone(),
            })?;
        tracing::debug!(command = %invocation, "running");

        let mut command = std::process::Command::new(program);
        let _ = command.args(&invocation.args);
        if let Some(dir) = &invocation.cwd {
            let _ = command.current_dir(dir);
        }

        let status = command.status().map_err(|e| McrdError::Spawn {
            program: invocation.program.clone(),
            source: e,
        })?;
        Ok(ExitStatus {
            code: status.code(),
        })
    }
}

/// Runs `invocation` and turns a non-zero exit into an error.
///
/// # Errors
///
/// Returns the runner's launch error, or `McrdError::CommandFailed` if the
/// process exits unsuccessfully.
pub fn run_checked(runner: &dyn ProcessRunner, invocation: &Invocation) -> Result<()> {
    let status = runner.run(invocation)?;
    if status.success() {
        Ok(())
    } else {
        Err(McrdError::CommandFailed {
            command: invocation.to_string(),
            code: status.code,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_program_and_args() {
        let inv = Invocation::new("docker").args(["start", "mc-server"]);
        assert_eq!(inv.to_string(), "docker start mc-server");
    }

    #[test]
    fn exit_status_success_only_for_zero() {
        assert!(ExitStatus::from_code(0).success());
        assert!(!ExitStatus::from_code(1).success());
        assert!(!ExitStatus { code: None }.success());
    }

    #[test]
    fn system_runner_reports_missing_program() {
        let inv = Invocation::new("mcrd-definitely-not-installed");
        assert!(matches!(
            SystemRunner.run(&inv),
            Err(McrdError::ProgramNotFound { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_returns_exit_code() {
        let inv = Invocation::new("sh").args(["-c", "exit 3"]);
        let status = SystemRunner.run(&inv).expect("run failed");
        assert_eq!(status.code, Some(3));
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_honours_working_directory() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let inv = Invocation::new("sh")
            .args(["-c", "touch marker"])
            .current_dir(dir.path());
        assert!(SystemRunner.run(&inv).expect("run failed").success());
        assert!(dir.path().join("marker").exists());
    }

    #[cfg(unix)]
    #[test]
    fn run_checked_maps_failure_to_command_failed() {
        let inv = Invocation::new("sh").args(["-c", "exit 2"]);
        assert!(matches!(
            run_checked(&SystemRunner, &inv),
            Err(McrdError::CommandFailed { code: Some(2), .. })
        ));
    }
}
