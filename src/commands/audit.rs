use crate::config::PhaseConfig;
use crate::fs::{self, OutputTree};
use crate::models::{ArtifactKind, AuditReport};
use anyhow::{bail, Result};
use chrono::Utc;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Number of filenames shown in the recency listing
const RECENT_LIMIT: usize = 5;

/// Run the read-only output audit from the current directory
pub fn execute(phase: Option<PathBuf>, json: bool, strict: bool) -> Result<()> {
    let base_dir = std::env::current_dir()?;
    run(&base_dir, phase.as_deref(), json, strict)
}

/// One stateless pass over the output tree: existence, per-kind counts,
/// and the most recent files from validation_data/ and graphs/.
///
/// A missing outputs root is a reportable condition, not an error, unless
/// `strict` is set.
pub fn run(base_dir: &Path, phase_override: Option<&Path>, json: bool, strict: bool) -> Result<()> {
    let config = PhaseConfig::load_or_default(base_dir)?;
    let phase_dir = config.phase_dir(base_dir, phase_override);

    let report = build_report(&phase_dir)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_dashboard(&report, &phase_dir);
    }

    if strict && !report.outputs_present {
        bail!(
            "Output directory not found: {}",
            OutputTree::new(&phase_dir).root().display()
        );
    }

    Ok(())
}

/// Collect the audit data without printing anything
pub fn build_report(phase_dir: &Path) -> Result<AuditReport> {
    let tree = OutputTree::new(phase_dir);
    let outputs_present = tree.exists();

    let counts = fs::count_by_kind(tree.root())?;

    let recent = if outputs_present {
        let validation_dir = tree.validation_data_dir();
        let graphs_dir = tree.graphs_dir();
        fs::recent_files(&[validation_dir.as_path(), graphs_dir.as_path()], RECENT_LIMIT)?
            .into_iter()
            .map(|f| f.name)
            .collect()
    } else {
        Vec::new()
    };

    Ok(AuditReport {
        phase: phase_dir.display().to_string(),
        timestamp: Utc::now(),
        outputs_present,
        counts,
        recent,
    })
}

fn print_dashboard(report: &AuditReport, phase_dir: &Path) {
    println!("{}", "Phase Output Audit".bold().blue());
    println!("{}", "=".repeat(50));

    if !report.outputs_present {
        println!(
            "\n{} Output directory not found: {}",
            "⚠".yellow().bold(),
            OutputTree::new(phase_dir).root().display()
        );
        println!("  {} Run 'phasekit setup' to create it", "Fix:".yellow());
        return;
    }

    println!("\n{}", "Artifacts".bold());
    for kind in ArtifactKind::ALL {
        let count = report.counts.get(&kind).copied().unwrap_or(0);
        println!("  {kind} files: {count}");
    }
    println!(
        "  {} {}",
        "Total:".bold(),
        report.total_files().to_string().bold()
    );

    if !report.recent.is_empty() {
        println!("\n{}", "Latest files".bold());
        for name in &report.recent {
            println!("  {name}");
        }
    }

    println!();
}
