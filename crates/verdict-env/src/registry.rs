use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use verdict_core::error::{EnvError, Result};

use crate::environment::Environment;
use crate::proxy;
use crate::wordle::WordleEnv;

/// Construction options for an environment, as parsed from JSON.
pub type EnvArgs = Map<String, Value>;

type EnvFactory = Box<dyn Fn(&EnvArgs) -> Result<Arc<dyn Environment>> + Send + Sync>;

/// Name-to-factory registry for environments.
///
/// Resolution is an explicit map lookup; no runtime reflection. Loading
/// an unregistered name fails with `EnvError::UnknownEnvironment`.
#[derive(Default)]
pub struct Registry {
    factories: HashMap<String, EnvFactory>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry with all built-in environments.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("wordle", |args| {
            Ok(Arc::new(WordleEnv::from_args(args)?) as Arc<dyn Environment>)
        });
        registry.register("vb-wordle-proxy", proxy::load_environment);
        registry
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn(&EnvArgs) -> Result<Arc<dyn Environment>> + Send + Sync + 'static,
    ) {
        self.factories.insert(name.into(), Box::new(factory));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered environment names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Resolve an environment by identifier, forwarding construction
    /// options to its factory.
    pub fn load(&self, name: &str, args: &EnvArgs) -> Result<Arc<dyn Environment>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| EnvError::UnknownEnvironment(name.to_string()))?;
        factory(args)
    }
}
