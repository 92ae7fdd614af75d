use clap::Parser;
use serde::{Deserialize, Serialize};

use verdict_core::error::{Result, VerdictError};
use verdict_core::sampling::SamplingArgs;
use verdict_env::registry::EnvArgs;

/// Programmatic eval runner for Verdict environments.
#[derive(Debug, Parser)]
#[command(name = "verdict", version, about)]
pub struct Args {
    /// Environment identifier (e.g., vb-wordle-proxy, wordle)
    pub env: String,

    /// Model identifier
    #[arg(short = 'm', long, env = "OPENAI_MODEL", default_value = "gpt-4o-mini")]
    pub model: String,

    /// Number of examples to evaluate
    #[arg(short = 'n', long, env = "NUM_EXAMPLES", default_value_t = 1)]
    pub num_examples: usize,

    /// Rollouts per example
    #[arg(short = 'r', long, env = "ROLLOUTS_PER_EXAMPLE", default_value_t = 1)]
    pub rollouts_per_example: usize,

    /// Maximum rollouts in flight at once
    #[arg(short = 'c', long, env = "MAX_CONCURRENT", default_value_t = 32)]
    pub max_concurrent: usize,

    /// JSON construction options for the environment
    #[arg(short = 'a', long, default_value = "{}")]
    pub env_args: String,

    /// JSON sampling args for the chat-completion API
    #[arg(short = 'S', long)]
    pub sampling_args: Option<String>,

    /// Token limit; overrides a same-named sampling-args key
    #[arg(short = 't', long, env = "MAX_TOKENS")]
    pub max_tokens: Option<u32>,

    /// Sampling temperature; overrides a same-named sampling-args key
    #[arg(short = 'T', long, env = "TEMPERATURE")]
    pub temperature: Option<f64>,
}

/// Fully resolved configuration for one run. Immutable after
/// construction; serialized verbatim as `meta.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub env: String,
    pub model: String,
    pub num_examples: usize,
    pub rollouts_per_example: usize,
    pub max_concurrent: usize,
    pub env_args: EnvArgs,
    pub sampling_args: SamplingArgs,
}

impl RunConfig {
    /// Merge parsed flags and JSON blobs into the effective run
    /// configuration.
    ///
    /// Fails fast on malformed JSON in either blob, before any
    /// environment resolution happens. Flag overrides for `max_tokens`
    /// and `temperature` beat same-named keys from the sampling blob.
    pub fn from_args(args: &Args) -> Result<Self> {
        let env_args: EnvArgs = serde_json::from_str(&args.env_args)
            .map_err(|e| VerdictError::Config(format!("Invalid --env-args JSON: {e}")))?;

        let sampling_args = match args.sampling_args.as_deref() {
            Some(text) => SamplingArgs::from_json(text)?,
            None => SamplingArgs::default(),
        }
        .with_overrides(args.max_tokens, args.temperature);

        Ok(Self {
            env: args.env.clone(),
            model: args.model.clone(),
            num_examples: args.num_examples,
            rollouts_per_example: args.rollouts_per_example,
            max_concurrent: args.max_concurrent,
            env_args,
            sampling_args,
        })
    }
}
