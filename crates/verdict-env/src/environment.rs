use std::collections::HashMap;

use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use verdict_core::error::{Result, VerdictError};
use verdict_core::{ChatClient, SamplingArgs};

use crate::dataset::Dataset;
use crate::results::{EvalResults, Rollout};

/// A single task example within an environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Example {
    /// Unique identifier for this example.
    pub id: String,
    /// Input presented to the model.
    pub input: Value,
    /// Hidden reference answer, when the task has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<Value>,
    /// Additional metadata (tags, difficulty, etc.)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, Value>,
}

/// Capability interface all environments expose.
///
/// Implementors define the task's examples and the mechanics of one
/// rollout; `evaluate` and `make_dataset` are provided.
#[async_trait]
pub trait Environment: std::fmt::Debug + Send + Sync {
    /// Environment identifier.
    fn name(&self) -> &str;

    /// The task's example set, in a stable order.
    fn examples(&self) -> Vec<Example>;

    /// Play one scored episode against a single example.
    async fn rollout(
        &self,
        client: &dyn ChatClient,
        model: &str,
        example: &Example,
        sampling: &SamplingArgs,
    ) -> Result<Rollout>;

    /// Run a full evaluation: the first `num_examples` examples, each
    /// rolled out `rollouts_per_example` times, with at most
    /// `max_concurrent` rollouts in flight at once.
    ///
    /// Results come back in (example, rollout-index) order regardless of
    /// completion order.
    async fn evaluate(
        &self,
        client: &dyn ChatClient,
        model: &str,
        sampling: &SamplingArgs,
        num_examples: usize,
        rollouts_per_example: usize,
        max_concurrent: usize,
    ) -> Result<EvalResults> {
        let examples: Vec<Example> = self.examples().into_iter().take(num_examples).collect();

        let mut jobs = Vec::new();
        for (position, example) in examples.iter().enumerate() {
            for index in 0..rollouts_per_example {
                jobs.push((position, index, example.clone()));
            }
        }
        tracing::info!(
            env = self.name(),
            model,
            rollouts = jobs.len(),
            max_concurrent,
            "starting evaluation"
        );

        // buffer_unordered(0) would never poll anything
        let concurrency = max_concurrent.max(1);
        let mut indexed: Vec<(usize, usize, Rollout)> = stream::iter(jobs)
            .map(|(position, index, example)| async move {
                let mut rollout = self.rollout(client, model, &example, sampling).await?;
                rollout.rollout_index = index;
                Ok::<_, VerdictError>((position, index, rollout))
            })
            .buffer_unordered(concurrency)
            .try_collect()
            .await?;
        indexed.sort_by_key(|(position, index, _)| (*position, *index));

        let rollouts: Vec<Rollout> = indexed.into_iter().map(|(_, _, r)| r).collect();
        let aggregate_metrics = EvalResults::aggregate(&rollouts);
        Ok(EvalResults {
            env: self.name().to_string(),
            model: model.to_string(),
            rollouts,
            aggregate_metrics,
        })
    }

    /// Convert raw results into the exportable dataset schema.
    fn make_dataset(&self, results: &EvalResults) -> Result<Dataset> {
        Ok(Dataset::from_results(results))
    }
}
