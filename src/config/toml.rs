//! TOML configuration file parsing

use super::cli::Cli;
use super::BenchConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<BenchConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<BenchConfig> {
    let config: BenchConfig =
        ::toml::from_str(contents).context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Merge CLI arguments with TOML configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut config: BenchConfig) -> BenchConfig {
    if let Some(dim0) = cli.dim0 {
        config.domain.dim0 = dim0;
    }
    if let Some(dim1) = cli.dim1 {
        config.domain.dim1 = dim1;
    }
    if let Some(chunk0) = cli.chunk0 {
        config.chunk.chunk0 = chunk0;
    }
    if let Some(chunk1) = cli.chunk1 {
        config.chunk.chunk1 = chunk1;
    }
    if let Some(workers) = cli.workers {
        config.workers.count = workers;
    }
    if let Some(seed) = cli.seed {
        config.workers.seed = seed;
    }
    if let Some(access) = cli.access {
        config.access.order = access;
    }
    if let Some(engine) = cli.engine {
        config.engine.kind = engine;
    }
    if let Some(ref path) = cli.path {
        config.engine.path = Some(path.clone());
    }
    if let Some(ref path) = cli.json_output {
        config.output.json_output = Some(path.clone());
    }
    config
}
