use std::path::{Path, PathBuf};

use verdict_core::error::Result;
use verdict_env::environment::Environment;
use verdict_env::results::EvalResults;

use crate::args::RunConfig;

pub const ENVIRONMENTS_ROOT: &str = "environments";
pub const EXTERNAL_DIR: &str = "_external";

/// How `data.json` ended up on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetExport {
    /// The environment's dataset schema was written.
    Dataset,
    /// Dataset export failed; raw results were written instead.
    RawFallback,
}

/// Environment identifier as a directory name.
pub fn sanitize_env_dir(env: &str) -> String {
    env.replace(['/', '-'], "_")
}

/// Resolve the run directory for one invocation.
///
/// Runs land next to the environment if it has a local directory under
/// `environments/`, otherwise under `environments/_external/`. The
/// timestamp segment keeps repeated runs from colliding.
pub fn resolve_run_dir(root: &Path, env: &str, model: &str, timestamp: &str) -> PathBuf {
    let dir_name = sanitize_env_dir(env);
    let local = root.join(ENVIRONMENTS_ROOT).join(&dir_name);
    let base = if local.is_dir() {
        local
    } else {
        root.join(ENVIRONMENTS_ROOT)
            .join(EXTERNAL_DIR)
            .join(&dir_name)
    };
    base.join("outputs")
        .join("evals")
        .join(format!("{env}--{model}"))
        .join(timestamp)
}

/// Write `data.json`: the environment's dataset schema when it exports
/// cleanly, the raw results otherwise. The file always exists afterward.
pub fn write_data_json(
    env: &dyn Environment,
    results: &EvalResults,
    run_dir: &Path,
) -> Result<DatasetExport> {
    let path = run_dir.join("data.json");
    match env
        .make_dataset(results)
        .and_then(|ds| ds.to_json_file(&path))
    {
        Ok(()) => Ok(DatasetExport::Dataset),
        Err(e) => {
            tracing::warn!(error = %e, "dataset export failed, writing raw results");
            let json = serde_json::to_string_pretty(results)?;
            std::fs::write(&path, json)?;
            Ok(DatasetExport::RawFallback)
        }
    }
}

/// Write `meta.json`: the resolved run configuration.
pub fn write_meta_json(config: &RunConfig, run_dir: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(run_dir.join("meta.json"), json)?;
    Ok(())
}
