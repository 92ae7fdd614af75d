//! Chat-completion client implementations.

pub mod openai;

pub use openai::OpenAIClient;
