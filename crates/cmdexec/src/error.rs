//! Error types for command execution.

use thiserror::Error;

/// Errors that can occur while running an external command.
#[derive(Debug, Error)]
pub enum Error {
    /// The program is not installed or not on `PATH`
    #[error("{program} not found - is it installed and on PATH?")]
    NotFound {
        /// Program that could not be located
        program: String,
    },

    /// The process could not be started
    #[error("failed to execute `{command}`")]
    Spawn {
        /// Rendered command line
        command: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The process ran but exited unsuccessfully
    #[error("command `{command}` failed ({}){}", status_text(.status), output_text(.output))]
    Failed {
        /// Rendered command line
        command: String,
        /// Exit code, if the process was not killed by a signal
        status: Option<i32>,
        /// Captured stdout followed by stderr (empty when output was streamed)
        output: String,
    },
}

impl Error {
    /// Captured output attached to a failed command, if any.
    pub fn output(&self) -> Option<&str> {
        match self {
            Error::Failed { output, .. } if !output.is_empty() => Some(output),
            _ => None,
        }
    }
}

fn status_text(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit status {code}"),
        None => "terminated by signal".to_string(),
    }
}

fn output_text(output: &str) -> String {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(":\n{trimmed}")
    }
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_message_includes_output() {
        let err = Error::Failed {
            command: "gsutil cp a b".to_string(),
            status: Some(1),
            output: "AccessDeniedException: 403\n".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("gsutil cp a b"));
        assert!(msg.contains("exit status 1"));
        assert!(msg.contains("AccessDeniedException: 403"));
        assert_eq!(err.output(), Some("AccessDeniedException: 403\n"));
    }

    #[test]
    fn test_failed_message_without_output() {
        let err = Error::Failed {
            command: "gcloud version".to_string(),
            status: None,
            output: String::new(),
        };
        assert_eq!(
            err.to_string(),
            "command `gcloud version` failed (terminated by signal)"
        );
        assert!(err.output().is_none());
    }
}
