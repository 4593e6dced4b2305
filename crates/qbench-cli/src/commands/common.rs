//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use qbench_adapter_sim::SimulatorBackend;
use qbench_fourier::{FourierDiscriminationResult, FourierExperimentSet};
use qbench_hal::{Backend, BackendDescription, BackendRegistry};

/// Build the registry of built-in backend providers.
pub fn backend_registry() -> BackendRegistry {
    let mut registry = BackendRegistry::new();
    registry.register::<SimulatorBackend>("sim");
    registry
}

/// Load an experiment descriptor from a YAML file.
pub fn load_experiment(path: &str) -> Result<FourierExperimentSet> {
    let source = read_source(path)?;
    let experiments: FourierExperimentSet = serde_yaml_ng::from_str(&source)
        .with_context(|| format!("Malformed experiment descriptor: {path}"))?;
    debug!("Loaded experiment descriptor from {}", path);
    Ok(experiments)
}

/// Load a backend description from a YAML file.
pub fn load_backend_description(path: &str) -> Result<BackendDescription> {
    let source = read_source(path)?;
    serde_yaml_ng::from_str(&source)
        .with_context(|| format!("Malformed backend description: {path}"))
}

/// Load a result document from a YAML file.
pub fn load_results(path: &str) -> Result<FourierDiscriminationResult> {
    let source = read_source(path)?;
    serde_yaml_ng::from_str(&source)
        .with_context(|| format!("Malformed result document: {path}"))
}

/// Instantiate the backend named by a description.
pub fn create_backend(description: &BackendDescription) -> Result<Box<dyn Backend>> {
    description.create(&backend_registry()).with_context(|| {
        format!(
            "Failed to create backend '{}/{}'",
            description.provider, description.name
        )
    })
}

/// Serialize a value to a YAML file.
pub fn save_yaml<T: serde::Serialize>(value: &T, path: &str) -> Result<()> {
    let rendered = serde_yaml_ng::to_string(value).context("Failed to serialize document")?;
    fs::write(path, rendered).with_context(|| format!("Failed to write file: {path}"))
}

fn read_source(path: &str) -> Result<String> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
}
