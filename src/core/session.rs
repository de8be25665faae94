//! The per-turn chat loop.
//!
//! Each turn is strictly sequential: resolve directives, send the augmented
//! message upstream, print the reply, then extract and confirm any suggested
//! commands. Nothing overlaps; the next prompt only appears once the whole
//! pipeline for the previous turn has finished.

use std::error::Error;
use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::api::client::{ApiClient, ApiError};
use crate::api::ChatMessage;
use crate::core::confirm::{ExecutionConfirmer, Prompter};
use crate::core::directive::DirectiveResolver;
use crate::core::exec::CommandRunner;
use crate::core::extract::{extract_code_blocks, Shell};

/// Instruction prepended to every message so replies carry commands in
/// fences the extractor recognizes.
pub fn system_prompt(shell: Shell) -> String {
    let tag = shell.tag();
    format!(
        "You are a capable AI assistant. Think step by step and answer \
         accurately and in detail.\n\
         When your answer includes {tag} commands, wrap each one in a \
         ```{tag} ``` fence so it can be copied as is.\n\n"
    )
}

pub struct ChatSession<'a, R: CommandRunner, P: Prompter> {
    api: &'a ApiClient,
    model: String,
    shell: Shell,
    max_file_bytes: u64,
    runner: &'a R,
    prompter: P,
}

impl<'a, R: CommandRunner, P: Prompter> ChatSession<'a, R, P> {
    pub fn new(
        api: &'a ApiClient,
        model: String,
        shell: Shell,
        max_file_bytes: u64,
        runner: &'a R,
        prompter: P,
    ) -> Self {
        Self {
            api,
            model,
            shell,
            max_file_bytes,
            runner,
            prompter,
        }
    }

    /// Read/resolve/send/confirm until the user submits an empty line.
    pub async fn run(&mut self) -> Result<(), Box<dyn Error>> {
        println!(
            "Starting chat with model '{}'. (Press Enter on an empty line to quit.)",
            self.model
        );

        let preprompt = system_prompt(self.shell);
        let resolver = DirectiveResolver::new(self.runner, self.max_file_bytes);
        let confirmer = ExecutionConfirmer::new(self.runner);
        let stdin = io::stdin();

        loop {
            print!("You: ");
            io::stdout().flush()?;
            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                break;
            }
            let line = line.trim_end_matches(['\r', '\n']);
            if line.trim().is_empty() {
                break;
            }

            let augmented = resolver.resolve(line).await;
            debug!(turn_bytes = augmented.len(), "sending chat turn");
            let message = ChatMessage::user(format!("{preprompt}{augmented}"));

            let reply = match self.api.chat(&self.model, vec![message]).await {
                Ok(reply) => reply,
                Err(ApiError::Status { status, body }) => {
                    println!("An API error occurred (Status: {status})");
                    println!("Details: {body}");
                    continue;
                }
                Err(source) => {
                    println!("Request failed: {source}");
                    continue;
                }
            };

            println!("AI: {reply}");

            if reply.is_empty() {
                continue;
            }
            let blocks = extract_code_blocks(&reply, self.shell);
            confirmer.confirm_and_run(&blocks, &mut self.prompter).await;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_names_the_shell_tag() {
        let bash = system_prompt(Shell::Bash);
        assert_eq!(bash.matches("bash").count(), 2);
        assert!(bash.ends_with("\n\n"));

        let powershell = system_prompt(Shell::Powershell);
        assert!(powershell.contains("```powershell"));
    }
}
