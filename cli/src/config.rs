use anyhow::{Context, Result};
use genbench_core::perf::RunnerConfig;
use std::path::Path;

/// Runner settings given explicitly on the command line; each one overrides
/// the config file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub filter: Option<String>,
    pub min_time_ms: Option<u64>,
    pub max_iters: Option<u64>,
    pub epochs: Option<u32>,
}

pub fn load_file(path: &Path) -> Result<RunnerConfig> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parse config {}", path.display()))
}

pub fn resolve(file: Option<&Path>, overrides: Overrides) -> Result<RunnerConfig> {
    let mut config = match file {
        Some(path) => load_file(path)?,
        None => RunnerConfig::default(),
    };
    if let Some(filter) = overrides.filter {
        config.filter = Some(filter);
    }
    if let Some(ms) = overrides.min_time_ms {
        config.min_time_ms = ms;
    }
    if let Some(iters) = overrides.max_iters {
        config.max_iters = iters;
    }
    if let Some(epochs) = overrides.epochs {
        config.epochs = epochs;
    }
    anyhow::ensure!(config.epochs > 0, "epochs must be at least 1");
    anyhow::ensure!(config.max_iters > 0, "max_iters must be at least 1");
    Ok(config)
}
