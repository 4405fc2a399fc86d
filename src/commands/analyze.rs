use crate::analysis::{AnalysisReport, CouplingAnalyzer};
use crate::config::{load_config, load_config_from, CouplingConfig};
use crate::facts::load_facts_file;
use crate::io::output::create_writer;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct AnalyzeConfig {
    pub facts: PathBuf,
    pub config: Option<PathBuf>,
    pub format: crate::cli::OutputFormat,
    pub output: Option<PathBuf>,
}

pub fn handle_analyze(config: AnalyzeConfig) -> Result<()> {
    let report = run_analysis(&config)?;

    let mut writer = create_writer(config.format.into(), config.output.as_deref())?;
    writer.write_report(&report)?;

    if let Some(path) = &config.output {
        log::info!("Report written to {}", path.display());
    }
    Ok(())
}

/// Load configuration and facts, then run both passes.
pub fn run_analysis(config: &AnalyzeConfig) -> Result<AnalysisReport> {
    let coupling_config = resolve_config(config)?;
    let input = load_facts_file(&config.facts)
        .with_context(|| format!("Failed to load facts from {}", config.facts.display()))?;

    if input.is_empty() {
        log::warn!(
            "No compiled or source units in {}; the report will be empty",
            config.facts.display()
        );
    }

    let analyzer = CouplingAnalyzer::new(coupling_config)?;
    Ok(analyzer.analyze(&input))
}

fn resolve_config(config: &AnalyzeConfig) -> Result<CouplingConfig> {
    match &config.config {
        Some(path) => load_config_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Ok(load_config()),
    }
}
