use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use verdict_core::message::Message;

/// Score from one rubric metric on one rollout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Score {
    /// Name of the metric.
    pub metric: String,
    /// Score value, typically 0.0 to 1.0.
    pub value: f64,
    /// Optional explanation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// One completed interaction episode between a model and an environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rollout {
    /// The example this rollout was played against.
    pub example_id: String,
    /// Index among repeated rollouts of the same example.
    pub rollout_index: usize,
    /// The example input the episode started from.
    pub input: Value,
    /// Full message transcript of the episode.
    pub transcript: Vec<Message>,
    /// Final assistant output.
    pub completion: String,
    /// Per-metric rubric scores.
    pub scores: Vec<Score>,
    /// Scalar reward combining the rubric metrics.
    pub reward: f64,
}

impl Rollout {
    /// Look up one metric's value by name.
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.scores.iter().find(|s| s.metric == name).map(|s| s.value)
    }
}

/// Raw results of an evaluation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalResults {
    /// Environment identifier.
    pub env: String,
    /// Model identifier.
    pub model: String,
    /// All rollouts, in (example, rollout-index) order.
    pub rollouts: Vec<Rollout>,
    /// Mean reward and per-metric means across all rollouts.
    pub aggregate_metrics: HashMap<String, f64>,
}

impl EvalResults {
    /// Compute aggregate means over a set of rollouts.
    pub fn aggregate(rollouts: &[Rollout]) -> HashMap<String, f64> {
        let mut aggregate = HashMap::new();
        if rollouts.is_empty() {
            return aggregate;
        }
        let n = rollouts.len() as f64;
        aggregate.insert(
            "reward".to_string(),
            rollouts.iter().map(|r| r.reward).sum::<f64>() / n,
        );

        let mut sums: HashMap<&str, (f64, usize)> = HashMap::new();
        for score in rollouts.iter().flat_map(|r| r.scores.iter()) {
            let entry = sums.entry(score.metric.as_str()).or_insert((0.0, 0));
            entry.0 += score.value;
            entry.1 += 1;
        }
        for (metric, (sum, count)) in sums {
            aggregate.insert(metric.to_string(), sum / count as f64);
        }
        aggregate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rollout(example_id: &str, reward: f64, correct: f64) -> Rollout {
        Rollout {
            example_id: example_id.into(),
            rollout_index: 0,
            input: json!({"q": "test"}),
            transcript: vec![Message::user("q"), Message::assistant("a")],
            completion: "a".into(),
            scores: vec![Score {
                metric: "correct".into(),
                value: correct,
                explanation: None,
            }],
            reward,
        }
    }

    #[test]
    fn aggregate_means() {
        let rollouts = vec![rollout("ex1", 1.0, 1.0), rollout("ex2", 0.0, 0.0)];
        let aggregate = EvalResults::aggregate(&rollouts);
        assert!((aggregate["reward"] - 0.5).abs() < 1e-10);
        assert!((aggregate["correct"] - 0.5).abs() < 1e-10);
    }

    #[test]
    fn aggregate_empty() {
        assert!(EvalResults::aggregate(&[]).is_empty());
    }

    #[test]
    fn metric_lookup() {
        let r = rollout("ex1", 1.0, 1.0);
        assert_eq!(r.metric("correct"), Some(1.0));
        assert_eq!(r.metric("missing"), None);
    }

    #[test]
    fn results_serde_roundtrip() {
        let results = EvalResults {
            env: "wordle".into(),
            model: "gpt-4o-mini".into(),
            rollouts: vec![rollout("ex1", 0.8, 1.0)],
            aggregate_metrics: HashMap::from([("reward".to_string(), 0.8)]),
        };
        let json_str = serde_json::to_string(&results).unwrap();
        let back: EvalResults = serde_json::from_str(&json_str).unwrap();
        assert_eq!(back.env, "wordle");
        assert_eq!(back.rollouts.len(), 1);
        assert_eq!(back.rollouts[0].example_id, "ex1");
    }
}
