//! Command-line interface parsing and startup orchestration.
//!
//! Startup loads the configuration, bootstraps a working API key (verifying
//! a saved one, or walking the user through getting a new one), picks a
//! model, and hands off to the chat session.

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::debug;

use crate::api::client::{ApiClient, ApiError, DEFAULT_BASE_URL, KEY_CONSOLE_URL};
use crate::api::models::pick_default_model;
use crate::core::config::Config;
use crate::core::confirm::StdinPrompter;
use crate::core::exec::ShellExecutor;
use crate::core::extract::Shell;
use crate::core::session::ChatSession;
use crate::utils::browser;

#[derive(Parser)]
#[command(name = "shellchat")]
#[command(about = "A terminal chat client that mediates between an AI and your shell")]
#[command(
    long_about = "Shellchat is a line-oriented terminal chat client for OpenAI-compatible \
APIs. It augments your messages with local context and offers to run the \
commands the AI suggests, one confirmation at a time.\n\n\
Message directives:\n\
  >command          Run a shell command and append its output to the message\n\
  >\"cmd with args\"  Quote a command so it keeps its arguments\n\
  @path             Append a file's contents (small files only)\n\
  @\"path with spaces\"\n\n\
Directives chain from the start of the line; the first non-directive word\n\
begins the literal message.\n\n\
Suggested commands:\n\
  y    run this command          n    skip this command\n\
  Y    run all remaining ones    N    skip all remaining ones"
)]
pub struct Args {
    /// Model id to chat with (skips the automatic pick)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Path to the configuration file (defaults to the platform config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub async fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    debug!(config_path = %config_path.display(), "loading configuration");
    let mut config = Config::load_from_path(&config_path)?;

    let mut api: Option<ApiClient> = None;
    if let Some(key) = config.api_key.as_deref().filter(|key| !key.trim().is_empty()) {
        println!("Checking the saved API key...");
        let candidate = ApiClient::new(&args.base_url, key);
        match candidate.verify_key().await {
            Ok(()) => api = Some(candidate),
            Err(ApiError::Status { status, .. }) => {
                println!("The saved API key is no longer valid (Status: {status}).");
            }
            Err(source) => {
                println!("An error occurred while checking the connection: {source}");
            }
        }
    }

    let api = match api {
        Some(api) => api,
        None => match setup_api_key(&args.base_url, &mut config, &config_path).await? {
            Some(api) => api,
            None => return Ok(()),
        },
    };

    println!("Fetching the model list...");
    let models = api.list_models().await?;
    let model = match args.model {
        Some(model) => model,
        None => pick_default_model(&models)
            .map(str::to_string)
            .ok_or("the service returned no models")?,
    };

    let runner = ShellExecutor;
    let mut session = ChatSession::new(
        &api,
        model,
        Shell::native(),
        config.max_file_bytes(),
        &runner,
        StdinPrompter,
    );
    session.run().await
}

/// Walk the user through obtaining and saving a working key. Returns `None`
/// when they abort with an empty line.
async fn setup_api_key(
    base_url: &str,
    config: &mut Config,
    config_path: &std::path::Path,
) -> Result<Option<ApiClient>, Box<dyn Error>> {
    println!("No API key is configured. Opening the key console in your browser...");
    println!("If the browser does not open, get a key here:\n{KEY_CONSOLE_URL}");
    if let Err(source) = browser::open_url(KEY_CONSOLE_URL) {
        debug!(%source, "browser launch failed");
    }

    let stdin = io::stdin();
    loop {
        print!("Paste your API key: ");
        io::stdout().flush()?;
        let mut key = String::new();
        stdin.lock().read_line(&mut key)?;
        let key = key.trim();
        if key.is_empty() {
            println!("No API key was entered. Exiting.");
            return Ok(None);
        }

        println!("Checking the API key...");
        let candidate = ApiClient::new(base_url, key);
        match candidate.verify_key().await {
            Ok(()) => {
                config.api_key = Some(key.to_string());
                config.save_to_path(config_path)?;
                return Ok(Some(candidate));
            }
            Err(ApiError::Status { status, .. }) => {
                println!("That API key looks invalid (Status: {status}).");
            }
            Err(source) => {
                println!("An error occurred while checking the connection: {source}");
            }
        }
    }
}
