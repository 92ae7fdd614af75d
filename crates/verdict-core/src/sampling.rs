use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, VerdictError};

/// Sampling parameters forwarded to the chat-completion API.
///
/// `max_tokens` and `temperature` are recognized explicitly; any other key
/// supplied via a sampling-args JSON blob is carried through untouched in
/// `extra` and sent to the API verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SamplingArgs {
    /// Maximum tokens to generate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    /// Passthrough keys, forwarded to the API unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SamplingArgs {
    /// Parse a sampling-args JSON blob.
    ///
    /// Fails with a descriptive `Config` error on malformed JSON or a
    /// non-object value.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| VerdictError::Config(format!("Invalid --sampling-args JSON: {e}")))
    }

    /// Layer explicit flag values on top of whatever the JSON blob set.
    ///
    /// A `Some` flag always wins over a same-named blob key; `None` leaves
    /// the blob value (or unset default) in place.
    pub fn with_overrides(mut self, max_tokens: Option<u32>, temperature: Option<f64>) -> Self {
        if max_tokens.is_some() {
            self.max_tokens = max_tokens;
        }
        if temperature.is_some() {
            self.temperature = temperature;
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.max_tokens.is_none() && self.temperature.is_none() && self.extra.is_empty()
    }
}
