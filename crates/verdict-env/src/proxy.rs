//! Proxy loader that returns the canonical Wordle environment.
//!
//! Lets a namespaced clone (`vb-wordle-proxy`) rely on the canonical
//! implementation for behavior and rubric. All construction options are
//! forwarded unchanged; resolution failures propagate untranslated.

use std::sync::Arc;

use verdict_core::error::Result;

use crate::environment::Environment;
use crate::registry::{EnvArgs, Registry};

/// The upstream environment id the proxy resolves.
pub const CANONICAL_ENV: &str = "wordle";

pub fn load_environment(args: &EnvArgs) -> Result<Arc<dyn Environment>> {
    // No validation, transformation, or caching of the options here.
    Registry::builtin().load(CANONICAL_ENV, args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdict_core::error::{EnvError, VerdictError};

    #[test]
    fn proxy_resolves_canonical_environment() {
        let env = load_environment(&EnvArgs::new()).unwrap();
        assert_eq!(env.name(), CANONICAL_ENV);
    }

    #[test]
    fn proxy_forwards_options_unchanged() {
        let args: EnvArgs = serde_json::from_str(r#"{"seed": 7}"#).unwrap();
        let via_proxy = load_environment(&args).unwrap();
        let direct = Registry::builtin().load(CANONICAL_ENV, &args).unwrap();
        // Same options reach the canonical env either way.
        assert_eq!(via_proxy.examples()[0].answer, direct.examples()[0].answer);
    }

    #[test]
    fn proxy_propagates_resolution_errors() {
        let args: EnvArgs = serde_json::from_str(r#"{"not_an_option": true}"#).unwrap();
        let err = load_environment(&args).unwrap_err();
        assert!(matches!(err, VerdictError::Env(EnvError::InvalidArgs(_))));
    }

    #[test]
    fn proxy_is_registered() {
        let registry = Registry::builtin();
        let env = registry.load("vb-wordle-proxy", &EnvArgs::new()).unwrap();
        assert_eq!(env.name(), CANONICAL_ENV);
    }
}
