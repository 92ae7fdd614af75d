//! Core types, traits, and abstractions shared across the Verdict
//! evaluation harness.

pub mod client;
pub mod error;
pub mod message;
pub mod sampling;

pub use client::{ChatClient, ChatResponse, ClientConfig};
pub use error::{EnvError, ModelError, Result, VerdictError};
pub use message::{Message, UsageMetadata};
pub use sampling::SamplingArgs;
