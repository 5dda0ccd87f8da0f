//! # cmdexec
//!
//! Execution boundary for the external CLIs that provision cloud resources
//! (`gcloud`, `gsutil`, ...).
//!
//! Every component that shells out takes a [`Runner`] at construction, so the
//! real [`SystemRunner`] can be swapped for a [`MockRunner`] in tests.
//!
//! ## Example
//!
//! ```no_run
//! use cmdexec::{CommandLine, Runner, SystemRunner};
//!
//! let runner = SystemRunner::new();
//! let cmd = CommandLine::new("gcloud").args(["config", "list", "--format", "json"]);
//! let output = runner.combined_output(&cmd).expect("gcloud failed");
//! println!("{}", output.stdout_str());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod mock;

pub use error::{Error, Result};
pub use mock::{MockResponse, MockRunner};

use std::fmt;
use std::process::{Command, Output, Stdio};

/// A program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// Executable name or path
    pub program: String,
    /// Arguments, in order
    pub args: Vec<String>,
}

impl CommandLine {
    /// Create a command line with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Check whether the arguments start with the given prefix.
    pub fn starts_with(&self, prefix: &[&str]) -> bool {
        prefix.len() <= self.args.len() && self.args.iter().zip(prefix).all(|(a, p)| a == p)
    }

    /// Check whether any argument equals `arg`.
    pub fn has_arg(&self, arg: &str) -> bool {
        self.args.iter().any(|a| a == arg)
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " '{arg}'")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Captured output of a finished command.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// Raw standard output
    pub stdout: Vec<u8>,
    /// Raw standard error
    pub stderr: Vec<u8>,
    /// Whether the process exited with status zero
    pub success: bool,
}

impl From<Output> for CommandOutput {
    fn from(output: Output) -> Self {
        Self {
            stdout: output.stdout,
            stderr: output.stderr,
            success: output.status.success(),
        }
    }
}

impl CommandOutput {
    /// Successful output with the given stdout.
    pub fn success(stdout: impl Into<Vec<u8>>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: Vec::new(),
            success: true,
        }
    }

    /// Get stdout as a string
    pub fn stdout_str(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }

    /// Get stderr as a string
    pub fn stderr_str(&self) -> String {
        String::from_utf8_lossy(&self.stderr).to_string()
    }

    /// Stdout followed by stderr, as the process would have printed them.
    pub fn combined(&self) -> String {
        let mut out = self.stdout_str();
        out.push_str(&self.stderr_str());
        out
    }
}

/// Command executor boundary.
///
/// Implementations must not retry: provisioning commands are not idempotent
/// against a partially applied previous attempt.
pub trait Runner: Send + Sync {
    /// Run a command, streaming its output to the terminal.
    fn run(&self, cmd: &CommandLine) -> Result<()>;

    /// Run a command and capture its output.
    ///
    /// A non-zero exit is returned as [`Error::Failed`] carrying the combined
    /// stdout and stderr.
    fn combined_output(&self, cmd: &CommandLine) -> Result<CommandOutput>;
}

/// Runner that spawns real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new SystemRunner.
    pub fn new() -> Self {
        Self
    }

    fn spawn_error(cmd: &CommandLine, e: std::io::Error) -> Error {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::NotFound {
                program: cmd.program.clone(),
            }
        } else {
            Error::Spawn {
                command: cmd.to_string(),
                source: e,
            }
        }
    }
}

impl Runner for SystemRunner {
    fn run(&self, cmd: &CommandLine) -> Result<()> {
        log::debug!("Running: {cmd}");
        let status = cmd
            .to_command()
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| Self::spawn_error(cmd, e))?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::Failed {
                command: cmd.to_string(),
                status: status.code(),
                output: String::new(),
            })
        }
    }

    fn combined_output(&self, cmd: &CommandLine) -> Result<CommandOutput> {
        log::debug!("Running (captured): {cmd}");
        let output = cmd
            .to_command()
            .stdin(Stdio::null())
            .output()
            .map_err(|e| Self::spawn_error(cmd, e))?;

        let status = output.status.code();
        let output = CommandOutput::from(output);
        if output.success {
            Ok(output)
        } else {
            Err(Error::Failed {
                command: cmd.to_string(),
                status,
                output: output.combined(),
            })
        }
    }
}
