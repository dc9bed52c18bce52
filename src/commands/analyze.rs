use crate::cli;
use crate::core::{FileKind, Finding, Severity};
use crate::detectors;
use crate::io;
use crate::io::output;
use crate::parse;
use crate::report::{self, ReportEntry};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

pub struct AnalyzeConfig {
    pub path: PathBuf,
    pub format: cli::OutputFormat,
    pub output: Option<PathBuf>,
    pub no_parallel: bool,
}

pub fn handle_analyze(config: AnalyzeConfig) -> Result<()> {
    let files = io::walker::find_source_files(&config.path)
        .with_context(|| format!("Failed to scan {}", config.path.display()))?;
    log::info!("Analyzing {} source files", files.len());

    let findings = if config.no_parallel {
        analyze_sequential(&files)?
    } else {
        analyze_parallel(&files)?
    };

    let entries = report::build_report(&findings);
    log_severity_summary(&entries);
    write_report(&config, &entries)
}

fn analyze_parallel(files: &[PathBuf]) -> Result<Vec<Finding>> {
    let per_file: Vec<Vec<Finding>> = files
        .par_iter()
        .map(|path| analyze_file(path))
        .collect::<Result<_>>()?;
    Ok(per_file.into_iter().flatten().collect())
}

fn analyze_sequential(files: &[PathBuf]) -> Result<Vec<Finding>> {
    let mut findings = Vec::new();
    for path in files {
        findings.extend(analyze_file(path)?);
    }
    Ok(findings)
}

fn analyze_file(path: &Path) -> Result<Vec<Finding>> {
    let Some(kind) = FileKind::from_path(path) else {
        return Ok(Vec::new());
    };
    let source =
        io::read_file(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let tree = match parse::parse_source(kind, &source) {
        Ok(tree) => tree,
        Err(err) => {
            log::warn!("Skipping {}: {}", path.display(), err);
            return Ok(Vec::new());
        }
    };
    log::debug!("Analyzed {}", path.display());
    Ok(match kind {
        FileKind::Script => detectors::analyze_script(path, &tree),
        FileKind::Markup => detectors::analyze_markup(path, &tree),
    })
}

fn log_severity_summary(entries: &[ReportEntry]) {
    for severity in [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
        Severity::Unknown,
    ] {
        let count = entries.iter().filter(|e| e.severity == severity).count();
        if count > 0 {
            log::info!("{severity}: {count} finding(s)");
        }
    }
}

fn write_report(config: &AnalyzeConfig, entries: &[ReportEntry]) -> Result<()> {
    let format = match config.format {
        cli::OutputFormat::Json => output::OutputFormat::Json,
        cli::OutputFormat::Terminal => output::OutputFormat::Terminal,
    };
    match &config.output {
        Some(path) => {
            let content = output::render_report(format, entries)?;
            io::write_file(path, &content)
                .with_context(|| format!("Failed to write {}", path.display()))
        }
        None => {
            let mut writer = output::create_writer(format);
            writer.write_report(entries)
        }
    }
}
