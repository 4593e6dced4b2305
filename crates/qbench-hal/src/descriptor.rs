//! Declarative backend descriptions.
//!
//! Experiment files reference backends declaratively: a provider key naming
//! a registered factory, a device name, and optional run options. Credentials
//! are never part of the description; an authenticated backend names the
//! environment variable its token is read from, and the token is resolved at
//! instantiation time only.

use serde::{Deserialize, Serialize};

use crate::backend::{Backend, BackendConfig};
use crate::error::{HalError, HalResult};
use crate::registry::BackendRegistry;

/// Declarative description of a backend, as stored in experiment and result
/// documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendDescription {
    /// Registry key of the factory that creates this backend.
    pub provider: String,
    /// Device or instance name passed to the factory.
    pub name: String,
    /// Whether jobs on this backend outlive the submitting process.
    ///
    /// Asynchronous backends get their job IDs persisted for later
    /// resolution instead of being polled to completion in-process.
    #[serde(default)]
    pub asynchronous: bool,
    /// Environment variable holding the authentication token, if the
    /// backend needs one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_env: Option<String>,
    /// Extra options forwarded to the factory.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub run_options: serde_json::Map<String, serde_json::Value>,
}

impl BackendDescription {
    /// Create a minimal description for a provider and device name.
    pub fn new(provider: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            name: name.into(),
            asynchronous: false,
            token_env: None,
            run_options: serde_json::Map::new(),
        }
    }

    /// Mark the described backend as asynchronous.
    pub fn with_asynchronous(mut self, asynchronous: bool) -> Self {
        self.asynchronous = asynchronous;
        self
    }

    /// Name the environment variable the token is read from.
    pub fn with_token_env(mut self, var: impl Into<String>) -> Self {
        self.token_env = Some(var.into());
        self
    }

    /// Resolve the token from the environment, if one is required.
    ///
    /// An unset or empty variable is an error; a description without
    /// `token_env` resolves to `None`.
    pub fn resolve_token(&self) -> HalResult<Option<String>> {
        match &self.token_env {
            None => Ok(None),
            Some(var) => match std::env::var(var) {
                Ok(token) if !token.is_empty() => Ok(Some(token)),
                _ => Err(HalError::MissingToken(var.clone())),
            },
        }
    }

    /// Instantiate the described backend via a registry.
    pub fn create(&self, registry: &BackendRegistry) -> HalResult<Box<dyn Backend>> {
        let mut config = BackendConfig::new(&self.name);
        if let Some(token) = self.resolve_token()? {
            config = config.with_token(token);
        }
        config.extra = self.run_options.clone();
        registry.create(&self.provider, config)
    }
}
