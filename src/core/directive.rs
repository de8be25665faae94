//! Input directives: `>command` and `@file` prefixes that pull local
//! context into a message before it is sent upstream.
//!
//! Directives chain: each resolved directive hands its remainder back to the
//! resolver, which keeps consuming until the remaining text no longer starts
//! with a sigil. Whatever is left is the literal message, and the resolved
//! context blocks are appended after it in the order they were encountered.

use std::path::Path;

use tracing::debug;

use crate::core::exec::CommandRunner;

/// Result of splitting a directive body into its head token and trailing
/// text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub head: String,
    pub remainder: String,
}

/// Split a directive body into a head token and the remaining text.
///
/// A body that starts with a double quote is read up to the closing quote,
/// so a head may contain spaces; an unterminated quote consumes the rest of
/// the body. Without quotes only the first whitespace-delimited token
/// becomes the head — everything after the first space is handed back as
/// the remainder for the resolver to re-examine as plain text. A multi-word
/// command must be quoted or only its first word runs.
pub fn parse(body: &str) -> ParsedCommand {
    if let Some(content) = body.strip_prefix('"') {
        match content.find('"') {
            Some(end) => ParsedCommand {
                head: content[..end].to_string(),
                remainder: content[end + 1..].trim().to_string(),
            },
            None => ParsedCommand {
                head: content.to_string(),
                remainder: String::new(),
            },
        }
    } else {
        match body.find(' ') {
            Some(space) => ParsedCommand {
                head: body[..space].to_string(),
                remainder: body[space + 1..].trim().to_string(),
            },
            None => ParsedCommand {
                head: body.to_string(),
                remainder: String::new(),
            },
        }
    }
}

/// A labeled, fenced rendering of one directive's result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextBlock {
    pub label: String,
    pub body: String,
}

impl ContextBlock {
    fn render(&self) -> String {
        format!("{}\n```\n{}\n```\n", self.label, self.body.trim_end())
    }
}

/// Rewrites a user line by resolving leading directives into context blocks.
pub struct DirectiveResolver<'a, R: CommandRunner> {
    runner: &'a R,
    max_file_bytes: u64,
}

impl<'a, R: CommandRunner> DirectiveResolver<'a, R> {
    pub fn new(runner: &'a R, max_file_bytes: u64) -> Self {
        Self {
            runner,
            max_file_bytes,
        }
    }

    /// Resolve every leading directive in `line` and return the augmented
    /// message: the leftover literal text followed by the rendered context
    /// blocks, in encounter order. A line that yields no blocks is returned
    /// unchanged.
    pub async fn resolve(&self, line: &str) -> String {
        let mut current = line.to_string();
        let mut blocks: Vec<ContextBlock> = Vec::new();

        loop {
            current = current.trim_start().to_string();
            if current.is_empty() {
                break;
            }

            if let Some(body) = current.strip_prefix('>') {
                let parsed = parse(body.trim());
                debug!(command = %parsed.head, "resolving command directive");
                let result = self.runner.run(&parsed.head).await;
                blocks.push(ContextBlock {
                    label: format!("Command: {}", parsed.head),
                    body: result.context_body(),
                });
                current = parsed.remainder;
            } else if let Some(body) = current.strip_prefix('@') {
                let parsed = parse(body.trim());
                debug!(path = %parsed.head, "resolving file directive");
                if let Some(block) = self.resolve_file(&parsed.head).await {
                    blocks.push(block);
                }
                current = parsed.remainder;
            } else {
                break;
            }
        }

        if blocks.is_empty() {
            return line.to_string();
        }

        let mut rendered = String::new();
        for block in &blocks {
            rendered.push_str(&block.render());
        }
        format!("{current}\n\n{rendered}")
    }

    /// A missing file is skipped silently; an oversized or unreadable one is
    /// skipped with a notice. Only a readable file at or under the size
    /// threshold produces a block.
    async fn resolve_file(&self, path: &str) -> Option<ContextBlock> {
        if !Path::new(path).exists() {
            return None;
        }
        match tokio::fs::read_to_string(path).await {
            Ok(content) => {
                if content.len() as u64 <= self.max_file_bytes {
                    Some(ContextBlock {
                        label: format!("File: {path}"),
                        body: content,
                    })
                } else {
                    println!("The file content is too large, so it will be ignored.");
                    None
                }
            }
            Err(source) => {
                println!("Failed to read the file: {source}");
                None
            }
        }
    }
}
