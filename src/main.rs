//! TileBench CLI entry point

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tilebench::config::cli::{Cli, Command};
use tilebench::config::{toml as config_toml, BenchConfig};
use tilebench::output::{coords, json, text};
use tilebench::partition;
use tilebench::sampler;
use tilebench::stats::RunReport;
use tilebench::worker::{self, Pass};

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    let config = build_config(&cli)?;

    match cli.command {
        Command::Write => run_bench(config, Pass::Write),
        Command::Read { verify } => run_bench(config, Pass::Read { verify }),
        Command::Sample {
            count,
            with_tile_ids,
            ref out,
        } => run_sample(&config, count, with_tile_ids, out),
        Command::Plan => run_plan(&config),
    }
}

/// Resolve the effective configuration: TOML file first, flags override
fn build_config(cli: &Cli) -> Result<BenchConfig> {
    let base = match &cli.config {
        Some(path) => config_toml::parse_toml_file(path)?,
        None => BenchConfig::default(),
    };
    Ok(config_toml::merge_cli_with_config(cli, base))
}

/// Run a write or read pass across all workers and report
fn run_bench(config: BenchConfig, pass: Pass) -> Result<()> {
    config
        .validate()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Configuration validation failed")?;
    print!("{}", config);
    println!();

    let config = Arc::new(config);
    let start = Instant::now();
    let stats = worker::run_pass(Arc::clone(&config), pass).context("Benchmark pass failed")?;
    let report = RunReport::from_workers(&stats, start.elapsed());

    text::print_report(&report);
    if let Some(ref path) = config.output.json_output {
        json::write_report(path, &report)
            .with_context(|| format!("Failed to write JSON report to {}", path.display()))?;
    }

    if report.verify_failures > 0 {
        anyhow::bail!("{} chunk(s) failed verification", report.verify_failures);
    }
    Ok(())
}

/// Draw unique coordinates and write the coordinate file
fn run_sample(config: &BenchConfig, count: u64, with_tile_ids: bool, out: &Path) -> Result<()> {
    let tiling = config.tiling()?;
    let seed = config.workers.seed;

    if with_tile_ids {
        let samples = sampler::sample_unique_with_tile_id(&tiling, count, seed)?;
        coords::write_tagged(out, &samples)
            .with_context(|| format!("Failed to write {}", out.display()))?;
    } else {
        let rect = tiling.domain().bounding_rectangle();
        let samples = sampler::sample_unique(&rect, count, seed)?;
        coords::write_plain(out, &samples)
            .with_context(|| format!("Failed to write {}", out.display()))?;
    }

    println!("Wrote {} coordinate(s) to {}", count, out.display());
    Ok(())
}

/// Print the per-worker partition table
fn run_plan(config: &BenchConfig) -> Result<()> {
    let tiling = config.tiling()?;
    let ranges = partition::plan(tiling.chunk_count(), config.workers.count as u64)?;
    text::print_partition_table(&tiling, &ranges);
    Ok(())
}
