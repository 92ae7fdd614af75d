//! Task environments for the Verdict harness.
//!
//! An [`Environment`] owns a set of examples and the mechanics of one
//! rollout; the provided `evaluate` method fans rollouts out with bounded
//! concurrency and aggregates scores. Environments are constructed by name
//! through the [`Registry`].

pub mod dataset;
pub mod environment;
pub mod proxy;
pub mod registry;
pub mod results;
pub mod wordle;

pub use dataset::{Dataset, DatasetRecord};
pub use environment::{Environment, Example};
pub use registry::{EnvArgs, Registry};
pub use results::{EvalResults, Rollout, Score};
pub use wordle::WordleEnv;
