//! Backend registry for managing available backends.
//!
//! The [`BackendRegistry`] provides a central point for discovering and
//! creating backend instances from declarative descriptions.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::backend::{Backend, BackendConfig, BackendFactory};
use crate::error::{HalError, HalResult};

/// Factory function type for built-in backends.
type BuiltinFactory = Box<dyn Fn(BackendConfig) -> HalResult<Box<dyn Backend>> + Send + Sync>;

/// Central registry for quantum backends.
///
/// Maps provider keys to factories, providing a unified interface for
/// backend discovery and creation.
pub struct BackendRegistry {
    /// Backend factories keyed by provider name.
    builtins: FxHashMap<String, BuiltinFactory>,
}

impl BackendRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            builtins: FxHashMap::default(),
        }
    }

    /// Register a backend factory under a provider key.
    pub fn register<B>(&mut self, provider: impl Into<String>)
    where
        B: BackendFactory + Backend + 'static,
    {
        let provider = provider.into();
        debug!("Registering backend provider: {}", provider);
        self.builtins.insert(
            provider,
            Box::new(|config| {
                let backend = B::from_config(config)?;
                Ok(Box::new(backend))
            }),
        );
    }

    /// Register a backend factory with a custom constructor.
    pub fn register_factory(
        &mut self,
        provider: impl Into<String>,
        factory: impl Fn(BackendConfig) -> HalResult<Box<dyn Backend>> + Send + Sync + 'static,
    ) {
        let provider = provider.into();
        debug!("Registering factory backend: {}", provider);
        self.builtins.insert(provider, Box::new(factory));
    }

    /// Create a backend by provider key.
    pub fn create(&self, provider: &str, config: BackendConfig) -> HalResult<Box<dyn Backend>> {
        if let Some(factory) = self.builtins.get(provider) {
            return factory(config);
        }

        Err(HalError::BackendUnavailable(format!(
            "No backend registered for provider '{}'",
            provider
        )))
    }

    /// List all registered provider keys.
    pub fn available_providers(&self) -> Vec<String> {
        let mut names: Vec<_> = self.builtins.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a provider key is registered.
    pub fn has_provider(&self, provider: &str) -> bool {
        self.builtins.contains_key(provider)
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_registry() {
        let registry = BackendRegistry::new();
        assert!(registry.available_providers().is_empty());
        assert!(!registry.has_provider("sim"));
    }

    #[test]
    fn test_register_factory() {
        let mut registry = BackendRegistry::new();
        registry.register_factory("test", |_config| {
            Err(HalError::BackendUnavailable("test only".into()))
        });

        assert!(registry.has_provider("test"));
        assert_eq!(registry.available_providers(), vec!["test"]);
    }

    #[test]
    fn test_create_unknown_provider() {
        let registry = BackendRegistry::new();
        let result = registry.create("nonexistent", BackendConfig::new("nonexistent"));
        assert!(result.is_err());
    }

    #[test]
    fn test_available_providers_sorted() {
        let mut registry = BackendRegistry::new();
        registry.register_factory("zebra", |_| {
            Err(HalError::BackendUnavailable("test".into()))
        });
        registry.register_factory("alpha", |_| {
            Err(HalError::BackendUnavailable("test".into()))
        });

        let providers = registry.available_providers();
        assert_eq!(providers, vec!["alpha", "zebra"]);
    }
}
