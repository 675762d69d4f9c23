//! @dose
//! purpose: Runs rendered command strings. The CommandExecutor trait is the contract the
//!     front end relies on; ShellExecutor passes the string unaltered to `sh -c`.
//!
//! when-editing:
//!     - !Never rewrite or re-quote the command; it is executed verbatim
//!
//! invariants:
//!     - execute waits for completion and captures stdout, stderr and the exit code
//!     - A process killed by a signal reports exit_code None

use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecError {
    #[error("Failed to spawn `{command}` in {cwd}: {source}")]
    Spawn {
        command: String,
        cwd: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Captured result of one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

impl ExecutionOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

pub trait CommandExecutor {
    fn execute(&self, command: &str, cwd: &Path) -> Result<ExecutionOutput, ExecError>;
}

/// Executes commands through a POSIX shell
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    shell: String,
}

impl ShellExecutor {
    pub fn new() -> Self {
        Self {
            shell: "sh".to_string(),
        }
    }

    pub fn with_shell(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor for ShellExecutor {
    fn execute(&self, command: &str, cwd: &Path) -> Result<ExecutionOutput, ExecError> {
        tracing::info!(command, cwd = %cwd.display(), "executing");

        let output = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .current_dir(cwd)
            .output()
            .map_err(|source| ExecError::Spawn {
                command: command.to_string(),
                cwd: cwd.to_path_buf(),
                source,
            })?;

        Ok(ExecutionOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        })
    }
}
