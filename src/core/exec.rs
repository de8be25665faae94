//! Shell command execution.
//!
//! Commands run in the platform shell: `powershell -NoProfile -Command` with
//! UTF-8 output forcing on Windows, `bash -c` everywhere else. Both output
//! streams are captured to completion and echoed to the console; there is no
//! timeout, so a hung child blocks the session until it exits.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

/// Outcome of one shell command run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecResult {
    pub stdout: String,
    pub stderr: String,
    /// Set when the spawn itself failed instead of the command producing
    /// output (shell not found, permission denied).
    pub error: Option<String>,
}

impl ExecResult {
    /// Fold the captured streams into the text embedded in a context block.
    pub fn context_body(&self) -> String {
        let mut body = String::new();
        if !self.stdout.trim().is_empty() {
            body.push_str(&self.stdout);
            if !body.ends_with('\n') {
                body.push('\n');
            }
        }
        if !self.stderr.trim().is_empty() {
            body.push_str("Error: ");
            body.push_str(self.stderr.trim_end());
            body.push('\n');
        }
        if let Some(message) = &self.error {
            body.push_str("Exception: ");
            body.push_str(message);
            body.push('\n');
        }
        body
    }
}

/// Seam between the directive resolver / execution confirmer and the real
/// shell, so both can be tested with a scripted runner.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command: &str) -> ExecResult;
}

/// Escape a command for the `bash -c` argument: double quotes are
/// backslash-escaped, nothing else is touched.
pub fn escape_unix(command: &str) -> String {
    command.replace('"', "\\\"")
}

/// Escape a command for the PowerShell `-Command` argument: embedded
/// newlines become `; ` separators and double quotes are backslash-escaped.
pub fn escape_windows(command: &str) -> String {
    command
        .replace("\r\n", "; ")
        .replace('\n', "; ")
        .replace('"', "\\\"")
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let escaped = escape_windows(command);
    let mut cmd = Command::new("powershell.exe");
    cmd.arg("-NoProfile").arg("-Command").arg(format!(
        "[Console]::OutputEncoding = [System.Text.Encoding]::UTF8; {escaped}"
    ));
    cmd
}

#[cfg(not(windows))]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("bash");
    cmd.arg("-c").arg(escape_unix(command));
    cmd
}

/// Runs commands in the platform shell, echoing captured output to the
/// console.
pub struct ShellExecutor;

#[async_trait]
impl CommandRunner for ShellExecutor {
    async fn run(&self, command: &str) -> ExecResult {
        debug!(command, "spawning shell command");
        let mut result = ExecResult::default();
        match shell_command(command).output().await {
            Ok(output) => {
                result.stdout = String::from_utf8_lossy(&output.stdout).into_owned();
                result.stderr = String::from_utf8_lossy(&output.stderr).into_owned();
                if !result.stdout.trim().is_empty() {
                    println!("{}", result.stdout);
                }
                if !result.stderr.trim().is_empty() {
                    println!("Error output: {}", result.stderr);
                }
            }
            Err(source) => {
                println!("Failed to run the command: {source}");
                result.error = Some(source.to_string());
            }
        }
        result
    }
}
