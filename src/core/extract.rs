//! Extraction of shell code blocks from response text.
//!
//! Only fences tagged with the session's shell dialect are considered; a
//! Windows session never extracts `bash` blocks and vice versa. That tag
//! match is the whole of platform enforcement.

use std::sync::OnceLock;

use regex::Regex;

/// Shell dialect a session extracts and executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Powershell,
}

impl Shell {
    /// The dialect native to the current platform.
    pub fn native() -> Self {
        if cfg!(windows) {
            Shell::Powershell
        } else {
            Shell::Bash
        }
    }

    /// The fence language tag this dialect matches.
    pub fn tag(self) -> &'static str {
        match self {
            Shell::Bash => "bash",
            Shell::Powershell => "powershell",
        }
    }
}

fn block_pattern(shell: Shell) -> &'static Regex {
    static BASH: OnceLock<Regex> = OnceLock::new();
    static POWERSHELL: OnceLock<Regex> = OnceLock::new();
    let cell = match shell {
        Shell::Bash => &BASH,
        Shell::Powershell => &POWERSHELL,
    };
    cell.get_or_init(|| {
        // Non-greedy so that back-to-back blocks stay separate; (?s) lets a
        // body span lines.
        Regex::new(&format!(r"(?s)```{}\s+(.*?)\s+```", shell.tag()))
            .expect("code block pattern is valid")
    })
}

/// Return the bodies of all fences tagged for `shell`, trimmed, in document
/// order. Fences with any other tag are ignored.
pub fn extract_code_blocks(text: &str, shell: Shell) -> Vec<String> {
    block_pattern(shell)
        .captures_iter(text)
        .map(|captures| captures[1].trim().to_string())
        .collect()
}
