//! Shared test doubles for the mediation components.

use std::collections::VecDeque;
use std::io;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::confirm::Prompter;
use crate::core::exec::{CommandRunner, ExecResult};

/// A `CommandRunner` that records every command and answers with canned
/// output instead of touching a real shell.
pub struct RecordingRunner {
    commands: Mutex<Vec<String>>,
    stdout: String,
}

impl RecordingRunner {
    pub fn with_stdout(stdout: &str) -> Self {
        Self {
            commands: Mutex::new(Vec::new()),
            stdout: stdout.to_string(),
        }
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().expect("runner lock").clone()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, command: &str) -> ExecResult {
        self.commands
            .lock()
            .expect("runner lock")
            .push(command.to_string());
        ExecResult {
            stdout: self.stdout.clone(),
            stderr: String::new(),
            error: None,
        }
    }
}

/// A `Prompter` that replays a fixed script and counts how many lines were
/// requested. Running out of script is an end-of-input error.
pub struct ScriptedPrompter {
    lines: VecDeque<String>,
    reads: usize,
}

impl ScriptedPrompter {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|line| line.to_string()).collect(),
            reads: 0,
        }
    }

    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&mut self) -> io::Result<String> {
        self.reads += 1;
        self.lines
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }
}
