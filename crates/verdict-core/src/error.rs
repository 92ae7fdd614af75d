use thiserror::Error;

/// Top-level error type for the Verdict harness.
#[derive(Debug, Error)]
pub enum VerdictError {
    #[error("Environment error: {0}")]
    Env(#[from] EnvError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("Unknown environment: {0}")]
    UnknownEnvironment(String),

    #[error("Invalid environment args: {0}")]
    InvalidArgs(String),

    #[error("Rollout failed: {0}")]
    Rollout(String),
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("API request failed: {0}")]
    ApiRequest(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Rate limited: retry after {retry_after_secs:?}s")]
    RateLimited { retry_after_secs: Option<u64> },
}

pub type Result<T> = std::result::Result<T, VerdictError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_error_display() {
        let err = EnvError::UnknownEnvironment("wordle".into());
        assert_eq!(err.to_string(), "Unknown environment: wordle");
    }

    #[test]
    fn model_error_display() {
        let err = ModelError::ApiRequest("timeout".into());
        assert_eq!(err.to_string(), "API request failed: timeout");
    }

    #[test]
    fn verdict_error_from_env_error() {
        let err: VerdictError = EnvError::UnknownEnvironment("nope".into()).into();
        assert!(matches!(
            err,
            VerdictError::Env(EnvError::UnknownEnvironment(_))
        ));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn verdict_error_from_model_error() {
        let err: VerdictError = ModelError::Auth("bad key".into()).into();
        assert!(matches!(err, VerdictError::Model(ModelError::Auth(_))));
        assert!(err.to_string().contains("bad key"));
    }

    #[test]
    fn verdict_error_from_serde() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: VerdictError = parse_err.into();
        assert!(matches!(err, VerdictError::Serialization(_)));
    }
}
