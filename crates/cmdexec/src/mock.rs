//! Recording runner for tests.
//!
//! [`MockRunner`] never spawns processes. It records every command it is
//! asked to run and answers from responses scripted by argument prefix:
//!
//! ```
//! use cmdexec::{CommandLine, MockResponse, MockRunner, Runner};
//!
//! let mock = MockRunner::new();
//! mock.on(&["deployments", "list"], MockResponse::stdout(r#"[{"name":"foo"}]"#));
//!
//! let out = mock
//!     .combined_output(&CommandLine::new("gcloud").args(["deployments", "list"]))
//!     .unwrap();
//! assert_eq!(out.stdout_str(), r#"[{"name":"foo"}]"#);
//! assert_eq!(mock.commands().len(), 1);
//! ```

use crate::error::{Error, Result};
use crate::{CommandLine, CommandOutput, Runner};
use std::sync::{Arc, Mutex};

/// Scripted answer for a matched command.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Exit successfully with the given stdout
    Success {
        /// Stdout returned to the caller
        stdout: String,
    },
    /// Exit with a non-zero status and the given combined output
    Failure {
        /// Exit code
        status: i32,
        /// Captured output attached to the error
        output: String,
    },
}

impl MockResponse {
    /// Successful response with stdout.
    pub fn stdout(stdout: impl Into<String>) -> Self {
        Self::Success {
            stdout: stdout.into(),
        }
    }

    /// Failing response with exit status 1.
    pub fn failure(output: impl Into<String>) -> Self {
        Self::Failure {
            status: 1,
            output: output.into(),
        }
    }
}

#[derive(Debug, Default)]
struct State {
    responses: Vec<(Vec<String>, MockResponse)>,
    commands: Vec<CommandLine>,
}

/// Runner that records commands instead of executing them.
///
/// Clones share state, so a test can hand a boxed clone to a client and keep
/// inspecting the original.
#[derive(Debug, Clone, Default)]
pub struct MockRunner {
    state: Arc<Mutex<State>>,
}

impl MockRunner {
    /// Create a mock where every command succeeds with empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a response for commands whose arguments start with `prefix`.
    ///
    /// Later scripts for the same prefix take precedence; among different
    /// prefixes the longest match wins.
    pub fn on(&self, prefix: &[&str], response: MockResponse) -> &Self {
        let mut state = self.state.lock().unwrap();
        let prefix: Vec<String> = prefix.iter().map(|s| (*s).to_string()).collect();
        state.responses.retain(|(p, _)| *p != prefix);
        state.responses.push((prefix, response));
        self
    }

    /// All commands issued so far, in order.
    pub fn commands(&self) -> Vec<CommandLine> {
        self.state.lock().unwrap().commands.clone()
    }

    /// Commands whose arguments start with `prefix`.
    pub fn commands_matching(&self, prefix: &[&str]) -> Vec<CommandLine> {
        self.commands()
            .into_iter()
            .filter(|c| c.starts_with(prefix))
            .collect()
    }

    fn respond(&self, cmd: &CommandLine) -> Result<CommandOutput> {
        let mut state = self.state.lock().unwrap();
        state.commands.push(cmd.clone());

        let response = state
            .responses
            .iter()
            .filter(|(prefix, _)| {
                let prefix: Vec<&str> = prefix.iter().map(String::as_str).collect();
                cmd.starts_with(&prefix)
            })
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, response)| response.clone());

        match response {
            None => Ok(CommandOutput::success(Vec::new())),
            Some(MockResponse::Success { stdout }) => Ok(CommandOutput::success(stdout)),
            Some(MockResponse::Failure { status, output }) => Err(Error::Failed {
                command: cmd.to_string(),
                status: Some(status),
                output,
            }),
        }
    }
}

impl Runner for MockRunner {
    fn run(&self, cmd: &CommandLine) -> Result<()> {
        self.respond(cmd).map(|_| ())
    }

    fn combined_output(&self, cmd: &CommandLine) -> Result<CommandOutput> {
        self.respond(cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gcloud(args: &[&str]) -> CommandLine {
        CommandLine::new("gcloud").args(args.iter().copied())
    }

    #[test]
    fn test_unmatched_command_succeeds_empty() {
        let mock = MockRunner::new();
        let out = mock.combined_output(&gcloud(&["version"])).unwrap();
        assert!(out.success);
        assert!(out.stdout.is_empty());
    }

    #[test]
    fn test_longest_prefix_wins() {
        let mock = MockRunner::new();
        mock.on(&["deployments"], MockResponse::stdout("short"))
            .on(&["deployments", "list"], MockResponse::stdout("long"));

        let out = mock.combined_output(&gcloud(&["deployments", "list"])).unwrap();
        assert_eq!(out.stdout_str(), "long");

        let out = mock.combined_output(&gcloud(&["deployments", "describe"])).unwrap();
        assert_eq!(out.stdout_str(), "short");
    }

    #[test]
    fn test_failure_response() {
        let mock = MockRunner::new();
        mock.on(&["cp"], MockResponse::failure("403 Forbidden"));

        let err = mock
            .run(&CommandLine::new("gsutil").args(["cp", "a", "b"]))
            .unwrap_err();
        assert_eq!(err.output(), Some("403 Forbidden"));
    }

    #[test]
    fn test_clones_share_recorded_commands() {
        let mock = MockRunner::new();
        let boxed: Box<dyn Runner> = Box::new(mock.clone());

        boxed.run(&gcloud(&["deployments", "create", "foo"])).unwrap();
        boxed.run(&gcloud(&["deployments", "update", "bar"])).unwrap();

        assert_eq!(mock.commands().len(), 2);
        assert_eq!(mock.commands_matching(&["deployments", "create"]).len(), 1);
    }
}
