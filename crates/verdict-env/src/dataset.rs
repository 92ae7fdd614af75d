use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use verdict_core::error::Result;

use crate::results::EvalResults;

/// One row of an exported evaluation dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetRecord {
    pub example_id: String,
    pub rollout_index: usize,
    pub prompt: Value,
    pub completion: String,
    pub reward: f64,
    /// Per-metric scores, flattened to name → value.
    pub metrics: HashMap<String, f64>,
}

/// A serializable dataset of rollout results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// Dataset name, conventionally `{env}--{model}`.
    pub name: String,
    pub records: Vec<DatasetRecord>,
}

impl Dataset {
    /// Build a dataset from raw evaluation results.
    pub fn from_results(results: &EvalResults) -> Self {
        let records = results
            .rollouts
            .iter()
            .map(|r| DatasetRecord {
                example_id: r.example_id.clone(),
                rollout_index: r.rollout_index,
                prompt: r.input.clone(),
                completion: r.completion.clone(),
                reward: r.reward,
                metrics: r
                    .scores
                    .iter()
                    .map(|s| (s.metric.clone(), s.value))
                    .collect(),
            })
            .collect();
        Self {
            name: format!("{}--{}", results.env, results.model),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serialize to pretty-printed JSON at the given path.
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::{Rollout, Score};
    use serde_json::json;
    use verdict_core::message::Message;

    fn results() -> EvalResults {
        EvalResults {
            env: "wordle".into(),
            model: "gpt-4o-mini".into(),
            rollouts: vec![Rollout {
                example_id: "wordle-000".into(),
                rollout_index: 0,
                input: json!({"word_length": 5}),
                transcript: vec![Message::user("guess"), Message::assistant("CRANE")],
                completion: "CRANE".into(),
                scores: vec![
                    Score {
                        metric: "correct".into(),
                        value: 1.0,
                        explanation: None,
                    },
                    Score {
                        metric: "efficiency".into(),
                        value: 1.0,
                        explanation: None,
                    },
                ],
                reward: 1.0,
            }],
            aggregate_metrics: HashMap::new(),
        }
    }

    #[test]
    fn from_results_flattens_scores() {
        let ds = Dataset::from_results(&results());
        assert_eq!(ds.name, "wordle--gpt-4o-mini");
        assert_eq!(ds.len(), 1);
        let record = &ds.records[0];
        assert_eq!(record.example_id, "wordle-000");
        assert_eq!(record.metrics["correct"], 1.0);
        assert_eq!(record.metrics["efficiency"], 1.0);
        assert_eq!(record.completion, "CRANE");
    }

    #[test]
    fn to_json_file_writes_valid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let ds = Dataset::from_results(&results());
        ds.to_json_file(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let back: Dataset = serde_json::from_str(&text).unwrap();
        assert_eq!(back.name, ds.name);
        assert_eq!(back.len(), 1);
    }

    #[test]
    fn empty_results_make_empty_dataset() {
        let mut r = results();
        r.rollouts.clear();
        let ds = Dataset::from_results(&r);
        assert!(ds.is_empty());
    }
}
