use crate::config::PhaseConfig;
use crate::fs::OutputTree;
use crate::runtime::{self, RuntimeError};
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Run the phase installer from the current directory
pub fn execute(phase: Option<PathBuf>, skip_generation: bool) -> Result<()> {
    let base_dir = std::env::current_dir()?;
    run(&base_dir, phase.as_deref(), skip_generation)
}

/// The full installer sequence: runtime probe, package installation, output
/// tree creation, script permissions, then the generation entry point.
///
/// Steps run strictly in order and the first hard failure stops the
/// sequence, leaving whatever partial state earlier steps produced.
pub fn run(base_dir: &Path, phase_override: Option<&Path>, skip_generation: bool) -> Result<()> {
    let config = PhaseConfig::load_or_default(base_dir)?;
    let phase_dir = config.phase_dir(base_dir, phase_override);

    println!("{}", "phasekit Setup".bold().blue());
    println!("{}", "=".repeat(50));
    println!("  {} {}", "Phase:".bold(), config.phase.name);

    check_runtime(&config);
    install_packages(&config)?;
    create_output_tree(&phase_dir)?;
    grant_script_permissions(&config, &phase_dir)?;

    if skip_generation {
        println!(
            "\n  {} Generation skipped {}",
            "─".dimmed(),
            "(--skip-generation)".dimmed()
        );
    } else {
        run_generation(&config, &phase_dir)?;
    }

    print_summary(&phase_dir);

    Ok(())
}

/// Probe the interpreter and package manager. Absence is informational
/// only; the sequence continues either way.
fn check_runtime(config: &PhaseConfig) {
    println!("\n{}", "Runtime".bold());
    println!("{}", "─".repeat(40).dimmed());

    for name in [&config.runtime.interpreter, &config.runtime.package_manager] {
        let info = runtime::detect_tool(name);
        match (&info.path, &info.version) {
            (Some(_), Some(version)) => {
                println!("  {} {} {}", "✓".green().bold(), name, version.dimmed());
            }
            (Some(_), None) => {
                println!("  {} {} {}", "✓".green().bold(), name, "(version unknown)".dimmed());
            }
            (None, _) => {
                println!(
                    "  {} {} not found on PATH",
                    "⚠".yellow().bold(),
                    name.bold()
                );
            }
        }
    }
}

/// Install the fixed package set. A required package failure aborts the
/// sequence; optional package failures become notices.
fn install_packages(config: &PhaseConfig) -> Result<()> {
    println!("\n{}", "Packages".bold());
    println!("{}", "─".repeat(40).dimmed());

    let manager = &config.runtime.package_manager;

    for package in &config.packages.required {
        runtime::install_package(manager, package)
            .with_context(|| format!("Failed to install required package '{package}'"))?;
        println!("  {} {}", "✓".green().bold(), package);
    }

    for package in &config.packages.optional {
        match runtime::install_package(manager, package) {
            Ok(()) => println!("  {} {}", "✓".green().bold(), package),
            Err(e) => {
                println!(
                    "  {} {} unavailable, continuing {}",
                    "⚠".yellow().bold(),
                    package.bold(),
                    format!("({e})").dimmed()
                );
            }
        }
    }

    Ok(())
}

fn create_output_tree(phase_dir: &Path) -> Result<()> {
    println!("\n{}", "Output tree".bold());
    println!("{}", "─".repeat(40).dimmed());

    let tree = OutputTree::new(phase_dir);
    tree.ensure()?;
    println!(
        "  {} Directory structure ready {}",
        "✓".green().bold(),
        tree.root().display().to_string().dimmed()
    );

    Ok(())
}

/// Mark the configured scripts executable. A missing path halts the
/// sequence here, before generation ever runs.
fn grant_script_permissions(config: &PhaseConfig, phase_dir: &Path) -> Result<()> {
    println!("\n{}", "Permissions".bold());
    println!("{}", "─".repeat(40).dimmed());

    for script in &config.scripts.executable {
        let path = phase_dir.join(script);
        runtime::make_executable(&path)
            .with_context(|| format!("Cannot mark '{}' executable", script.display()))?;
        println!("  {} {}", "✓".green().bold(), script.display());
    }

    Ok(())
}

fn run_generation(config: &PhaseConfig, phase_dir: &Path) -> Result<()> {
    println!("\n{}", "Generation".bold());
    println!("{}", "─".repeat(40).dimmed());

    let entry_point = phase_dir.join(&config.scripts.entry_point);
    if !entry_point.exists() {
        return Err(RuntimeError::ScriptMissing(entry_point).into());
    }

    println!(
        "  {} {}",
        "▶".cyan().bold(),
        entry_point.display().to_string().dimmed()
    );

    runtime::run_entry_point(&config.runtime.interpreter, &entry_point)
        .context("Generation entry point failed")?;

    println!("  {} Generation completed", "✓".green().bold());

    Ok(())
}

fn print_summary(phase_dir: &Path) {
    println!();
    println!("{}", "═".repeat(40).dimmed());
    println!(
        "{} Phase setup complete {}",
        "✓".green().bold(),
        phase_dir.display().to_string().cyan()
    );
    println!();
    println!("{}", "Next steps:".bold());
    println!("  {}  Audit generated outputs", "phasekit audit".cyan());
    println!("  {}  Record system specifications", "phasekit check".cyan());
    println!();
}
