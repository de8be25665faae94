//! Per-block confirmation of AI-suggested commands.
//!
//! Blocks are offered strictly in document order. `y` and `n` decide one
//! block at a time; `Y` and `N` are sticky — `Y` runs everything that
//! follows without asking again, `N` abandons the rest of the response
//! outright. Any other input re-prompts for the same block.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::core::exec::CommandRunner;

/// How the confirmer treats the remaining blocks in a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationState {
    /// Prompt for each block.
    AskEach,
    /// Execute every remaining block without prompting.
    AlwaysRun,
    /// Terminal: remaining blocks are neither shown nor executed.
    Halted,
}

/// One line of console input for a confirmation prompt.
pub trait Prompter {
    fn read_line(&mut self) -> io::Result<String>;
}

/// Reads confirmation answers from standard input.
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line)
    }
}

/// Walks extracted code blocks, asking per-block confirmation before running
/// each one.
pub struct ExecutionConfirmer<'a, R: CommandRunner> {
    runner: &'a R,
}

impl<'a, R: CommandRunner> ExecutionConfirmer<'a, R> {
    pub fn new(runner: &'a R) -> Self {
        Self { runner }
    }

    /// Process `blocks` in order under the confirmation state machine and
    /// return the state the pass ended in.
    pub async fn confirm_and_run<P: Prompter>(
        &self,
        blocks: &[String],
        prompter: &mut P,
    ) -> ConfirmationState {
        let mut state = ConfirmationState::AskEach;

        for block in blocks {
            match state {
                ConfirmationState::Halted => break,
                ConfirmationState::AlwaysRun => {
                    self.runner.run(block).await;
                    continue;
                }
                ConfirmationState::AskEach => {}
            }

            println!("\n--- Suggested command ---");
            println!("{block}");
            println!("-------------------------");
            print!("Run this command? (y/n): ");
            let _ = io::stdout().flush();

            loop {
                let input = match prompter.read_line() {
                    Ok(line) => line,
                    Err(source) => {
                        debug!(%source, "confirmation input unavailable, halting");
                        state = ConfirmationState::Halted;
                        break;
                    }
                };
                match input.trim() {
                    "y" => {
                        self.runner.run(block).await;
                        break;
                    }
                    "n" => {
                        println!("Command skipped.");
                        break;
                    }
                    "Y" => {
                        state = ConfirmationState::AlwaysRun;
                        self.runner.run(block).await;
                        break;
                    }
                    "N" => {
                        println!("All commands skipped.");
                        state = ConfirmationState::Halted;
                        break;
                    }
                    other => {
                        debug!(input = other, "unrecognized confirmation input");
                        // The notice claims a skip, but the same block is
                        // offered again; long-standing behavior, kept as is.
                        println!("Invalid input. Command skipped.");
                    }
                }
            }

            if state == ConfirmationState::Halted {
                break;
            }
        }

        state
    }
}
