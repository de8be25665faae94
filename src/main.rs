use clap::Parser;

use shellchat::cli::{self, Args};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(err) = cli::run(args).await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
