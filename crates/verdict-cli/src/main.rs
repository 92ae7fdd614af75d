use std::path::Path;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use verdict_cli::Args;
use verdict_llm::OpenAIClient;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    let client = OpenAIClient::from_env();

    if let Err(e) = verdict_cli::run(&args, &client, Path::new(".")).await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
