//! The canonical Wordle environment.
//!
//! Multi-turn guessing game: the model proposes 5-letter words and gets
//! per-letter feedback (`G` correct position, `Y` wrong position, `X` not
//! in the word) until it finds the target or runs out of turns.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use verdict_core::error::{EnvError, Result};
use verdict_core::message::Message;
use verdict_core::{ChatClient, SamplingArgs};

use crate::environment::{Environment, Example};
use crate::registry::EnvArgs;
use crate::results::{Rollout, Score};

pub const WORD_LENGTH: usize = 5;

const DEFAULT_WORDS: &[&str] = &[
    "CRANE", "SLATE", "AUDIO", "HOUSE", "PLANT", "BRICK", "STORM", "GLOBE", "MOUNT", "FLAME",
    "PRIDE", "SHARD", "QUILT", "VIVID", "LEMON", "CHASE", "TRUNK", "BLEND", "SPICE", "WAGER",
    "FROST", "GRAPE", "NOBLE", "SWIFT", "CHARM", "DRIFT", "EMBER", "LUNAR", "PIVOT", "RIDGE",
    "THORN", "WHALE",
];

/// Construction options accepted via `--env-args`.
///
/// Unknown keys are rejected, matching how a keyword-argument loader
/// would fail on an unexpected option.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WordleConfig {
    /// Guesses allowed per game.
    pub max_turns: usize,
    /// Target word list; defaults to the built-in list.
    pub words: Vec<String>,
    /// Deterministic rotation of the word list.
    pub seed: Option<u64>,
}

impl Default for WordleConfig {
    fn default() -> Self {
        Self {
            max_turns: 6,
            words: DEFAULT_WORDS.iter().map(|w| w.to_string()).collect(),
            seed: None,
        }
    }
}

#[derive(Debug)]
pub struct WordleEnv {
    config: WordleConfig,
    words: Vec<String>,
}

impl WordleEnv {
    pub fn new(config: WordleConfig) -> Result<Self> {
        let mut words: Vec<String> = config
            .words
            .iter()
            .map(|w| w.trim().to_ascii_uppercase())
            .collect();
        if let Some(bad) = words
            .iter()
            .find(|w| w.len() != WORD_LENGTH || !w.chars().all(|c| c.is_ascii_alphabetic()))
        {
            return Err(EnvError::InvalidArgs(format!(
                "word {bad:?} is not a {WORD_LENGTH}-letter word"
            ))
            .into());
        }
        if words.is_empty() {
            return Err(EnvError::InvalidArgs("word list is empty".into()).into());
        }
        if let Some(seed) = config.seed {
            let len = words.len();
            words.rotate_left(seed as usize % len);
        }
        Ok(Self { config, words })
    }

    /// Construct from registry args.
    pub fn from_args(args: &EnvArgs) -> Result<Self> {
        let config: WordleConfig = serde_json::from_value(Value::Object(args.clone()))
            .map_err(|e| EnvError::InvalidArgs(e.to_string()))?;
        Self::new(config)
    }

    pub fn max_turns(&self) -> usize {
        self.config.max_turns
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    fn system_prompt(&self) -> String {
        format!(
            "You are playing Wordle. Guess the hidden {WORD_LENGTH}-letter word. \
             After each guess you receive per-letter feedback: G means the letter \
             is in the correct position, Y means the letter is in the word but in \
             another position, X means the letter is not in the word. Reply with \
             exactly one {WORD_LENGTH}-letter word per turn; the last word in your \
             reply is taken as your guess."
        )
    }
}

/// Per-letter feedback marks for a guess against a target.
///
/// Two-pass marking: greens first, then yellows consuming the remaining
/// letter counts, so duplicated letters are never over-credited.
pub fn feedback(guess: &str, target: &str) -> String {
    let guess: Vec<char> = guess.chars().collect();
    let target: Vec<char> = target.chars().collect();
    let mut marks = vec!['X'; guess.len()];
    let mut remaining: HashMap<char, usize> = HashMap::new();

    for i in 0..guess.len().min(target.len()) {
        if guess[i] == target[i] {
            marks[i] = 'G';
        } else {
            *remaining.entry(target[i]).or_insert(0) += 1;
        }
    }
    for i in 0..guess.len() {
        if marks[i] == 'G' {
            continue;
        }
        if let Some(count) = remaining.get_mut(&guess[i])
            && *count > 0
        {
            marks[i] = 'Y';
            *count -= 1;
        }
    }

    let mut out = String::with_capacity(marks.len() * 2);
    for (i, mark) in marks.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(*mark);
    }
    out
}

/// Extract the model's guess: the last alphabetic 5-letter token.
pub fn parse_guess(text: &str) -> Option<String> {
    text.split(|c: char| !c.is_ascii_alphabetic())
        .filter(|w| w.len() == WORD_LENGTH)
        .next_back()
        .map(|w| w.to_ascii_uppercase())
}

#[async_trait]
impl Environment for WordleEnv {
    fn name(&self) -> &str {
        "wordle"
    }

    fn examples(&self) -> Vec<Example> {
        self.words
            .iter()
            .enumerate()
            .map(|(i, word)| Example {
                id: format!("wordle-{i:03}"),
                input: json!({
                    "game": "wordle",
                    "word_length": WORD_LENGTH,
                    "max_turns": self.config.max_turns,
                }),
                answer: Some(json!(word)),
                metadata: HashMap::new(),
            })
            .collect()
    }

    async fn rollout(
        &self,
        client: &dyn ChatClient,
        model: &str,
        example: &Example,
        sampling: &SamplingArgs,
    ) -> Result<Rollout> {
        let target = example
            .answer
            .as_ref()
            .and_then(|a| a.as_str())
            .ok_or_else(|| EnvError::Rollout(format!("example {} has no answer", example.id)))?
            .to_string();

        let mut transcript = vec![
            Message::system(self.system_prompt()),
            Message::user(format!(
                "Start guessing. You have {} guesses.",
                self.config.max_turns
            )),
        ];
        let mut completion = String::new();
        let mut solved = false;
        let mut turns_used = self.config.max_turns;

        for turn in 1..=self.config.max_turns {
            let response = client.generate(model, &transcript, sampling).await?;
            completion = response.content.clone();
            transcript.push(Message::assistant(response.content));

            match parse_guess(&completion) {
                None => transcript.push(Message::user(format!(
                    "Could not find a {WORD_LENGTH}-letter word in your reply. \
                     Reply with exactly one {WORD_LENGTH}-letter word."
                ))),
                Some(guess) if guess == target => {
                    solved = true;
                    turns_used = turn;
                    break;
                }
                Some(guess) => transcript.push(Message::user(format!(
                    "{guess}: {}",
                    feedback(&guess, &target)
                ))),
            }
        }

        let correct = if solved { 1.0 } else { 0.0 };
        let efficiency = if solved {
            (self.config.max_turns - turns_used + 1) as f64 / self.config.max_turns as f64
        } else {
            0.0
        };
        let reward = 0.8 * correct + 0.2 * efficiency;
        tracing::debug!(example = %example.id, solved, turns_used, reward, "rollout finished");

        Ok(Rollout {
            example_id: example.id.clone(),
            rollout_index: 0,
            input: example.input.clone(),
            transcript,
            completion,
            scores: vec![
                Score {
                    metric: "correct".into(),
                    value: correct,
                    explanation: Some(if solved {
                        format!("solved in {turns_used} turns")
                    } else {
                        "not solved".into()
                    }),
                },
                Score {
                    metric: "efficiency".into(),
                    value: efficiency,
                    explanation: None,
                },
            ],
            reward,
        })
    }
}
