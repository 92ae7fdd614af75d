//! Command-line eval runner: resolves an environment by name, runs an
//! evaluation against a chat-completion client, and persists results plus
//! run metadata to a timestamped directory.

pub mod args;
pub mod output;

use std::path::{Path, PathBuf};

use chrono::Utc;

use verdict_core::ChatClient;
use verdict_core::error::Result;
use verdict_env::registry::Registry;

pub use args::{Args, RunConfig};
pub use output::DatasetExport;

/// Artifacts of one completed run.
#[derive(Debug)]
pub struct RunOutcome {
    pub run_dir: PathBuf,
    pub export: DatasetExport,
}

/// Run one evaluation end to end.
///
/// `root` anchors the output directory tree (the working directory in
/// normal use). Configuration errors surface before any environment
/// resolution; everything past that propagates uncaught, except dataset
/// export, which falls back to a raw dump.
pub async fn run(args: &Args, client: &dyn ChatClient, root: &Path) -> Result<RunOutcome> {
    let config = RunConfig::from_args(args)?;

    let registry = Registry::builtin();
    let environment = registry.load(&config.env, &config.env_args)?;

    tracing::info!(
        env = %config.env,
        model = %config.model,
        n = config.num_examples,
        r = config.rollouts_per_example,
        "running evaluation"
    );

    let results = environment
        .evaluate(
            client,
            &config.model,
            &config.sampling_args,
            config.num_examples,
            config.rollouts_per_example,
            config.max_concurrent,
        )
        .await?;

    let timestamp = Utc::now().format("%Y%m%d-%H%M%S").to_string();
    let run_dir = output::resolve_run_dir(root, &config.env, &config.model, &timestamp);
    std::fs::create_dir_all(&run_dir)?;

    let export = output::write_data_json(environment.as_ref(), &results, &run_dir)?;
    output::write_meta_json(&config, &run_dir)?;

    tracing::info!("Saved dataset to {}", run_dir.display());
    Ok(RunOutcome { run_dir, export })
}
