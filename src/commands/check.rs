use crate::config::PhaseConfig;
use crate::fs::OutputTree;
use crate::models::report::{GitSection, HardwareSection, SystemReport, SystemSection};
use crate::runtime;
use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use sysinfo::{Disks, System};

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Run the system verification from the current directory
pub fn execute(phase: Option<PathBuf>) -> Result<()> {
    let base_dir = std::env::current_dir()?;
    run(&base_dir, phase.as_deref())
}

/// Collect host specifications and write the three report artifacts:
/// JSON specs and a text report under `outputs/reports/`, plus a markdown
/// summary at the project root.
pub fn run(base_dir: &Path, phase_override: Option<&Path>) -> Result<()> {
    let config = PhaseConfig::load_or_default(base_dir)?;
    let phase_dir = config.phase_dir(base_dir, phase_override);

    println!("{}", "System Verification".bold().blue());
    println!("{}", "=".repeat(50));

    let report = collect(&config);

    let tree = OutputTree::new(&phase_dir);
    tree.ensure()?;

    let written = write_reports(&report, &tree, base_dir)?;

    println!("\n{}", "Reports written".bold());
    for path in &written {
        println!("  {} {}", "✓".green().bold(), path.display());
    }

    print_warnings(&report);

    Ok(())
}

/// Gather the report data; infallible, missing sources degrade to blanks
pub fn collect(config: &PhaseConfig) -> SystemReport {
    let mut sys = System::new_all();
    sys.refresh_all();

    let cpu_count = sys.cpus().len();
    let cpu_count_physical = System::physical_core_count().unwrap_or(cpu_count);

    let (disk_total_gb, disk_free_gb) = root_disk_usage();

    let interpreter = runtime::detect_tool(&config.runtime.interpreter);

    SystemReport {
        timestamp: Utc::now(),
        phase: config.phase.name.clone(),
        system: SystemSection {
            os: System::name().unwrap_or_else(|| std::env::consts::OS.to_string()),
            os_version: System::os_version().unwrap_or_default(),
            architecture: std::env::consts::ARCH.to_string(),
            interpreter_version: interpreter.version.unwrap_or_default(),
        },
        hardware: HardwareSection {
            cpu_count,
            cpu_count_physical,
            ram_total_gb: to_gb(sys.total_memory()),
            ram_available_gb: to_gb(sys.available_memory()),
            disk_total_gb,
            disk_free_gb,
        },
        git: GitSection {
            username: git_config("user.name"),
            email: git_config("user.email"),
        },
    }
}

fn to_gb(bytes: u64) -> f64 {
    (bytes as f64 / BYTES_PER_GB * 100.0).round() / 100.0
}

/// Total/free space on the root mount, or the first disk when no mount
/// matches. All zeros when no disks are reported.
fn root_disk_usage() -> (f64, f64) {
    let disks = Disks::new_with_refreshed_list();
    let disk = disks
        .iter()
        .find(|d| d.mount_point() == Path::new("/"))
        .or_else(|| disks.iter().next());

    match disk {
        Some(d) => (to_gb(d.total_space()), to_gb(d.available_space())),
        None => (0.0, 0.0),
    }
}

fn git_config(key: &str) -> String {
    Command::new("git")
        .args(["config", key])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .unwrap_or_default()
}

fn write_reports(
    report: &SystemReport,
    tree: &OutputTree,
    base_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let json_path = tree.reports_dir().join("system_specs.json");
    let json = serde_json::to_string_pretty(report)?;
    fs::write(&json_path, json)
        .with_context(|| format!("Failed to write {}", json_path.display()))?;

    let text_path = tree.reports_dir().join("system_report.txt");
    fs::write(&text_path, render_text(report))
        .with_context(|| format!("Failed to write {}", text_path.display()))?;

    let md_path = base_dir.join("SYSTEM_VERIFICATION.md");
    fs::write(&md_path, render_markdown(report))
        .with_context(|| format!("Failed to write {}", md_path.display()))?;

    Ok(vec![json_path, text_path, md_path])
}

fn render_text(report: &SystemReport) -> String {
    let mut out = String::new();
    out.push_str(&"=".repeat(60));
    out.push_str("\nSYSTEM VERIFICATION REPORT\n");
    out.push_str(&"=".repeat(60));
    out.push_str("\n\n");
    out.push_str(&format!("Timestamp: {}\n", report.timestamp.to_rfc3339()));
    out.push_str(&format!("Project Phase: {}\n\n", report.phase));

    out.push_str("SYSTEM SPECIFICATIONS:\n");
    out.push_str(&"-".repeat(40));
    out.push('\n');
    out.push_str(&format!(
        "OS: {} {}\n",
        report.system.os, report.system.os_version
    ));
    out.push_str(&format!("Architecture: {}\n", report.system.architecture));
    out.push_str(&format!(
        "Interpreter: {}\n\n",
        if report.system.interpreter_version.is_empty() {
            "not found"
        } else {
            report.system.interpreter_version.as_str()
        }
    ));

    out.push_str("HARDWARE RESOURCES:\n");
    out.push_str(&"-".repeat(40));
    out.push('\n');
    out.push_str(&format!(
        "CPU Cores (logical): {}\n",
        report.hardware.cpu_count
    ));
    out.push_str(&format!(
        "CPU Cores (physical): {}\n",
        report.hardware.cpu_count_physical
    ));
    out.push_str(&format!("RAM Total: {} GB\n", report.hardware.ram_total_gb));
    out.push_str(&format!(
        "RAM Available: {} GB\n",
        report.hardware.ram_available_gb
    ));
    out.push_str(&format!(
        "Disk Total: {} GB\n",
        report.hardware.disk_total_gb
    ));
    out.push_str(&format!("Disk Free: {} GB\n\n", report.hardware.disk_free_gb));

    out.push_str("GIT CONFIGURATION:\n");
    out.push_str(&"-".repeat(40));
    out.push('\n');
    out.push_str(&format!("Username: {}\n", report.git.username));
    out.push_str(&format!("Email: {}\n", report.git.email));

    out
}

fn render_markdown(report: &SystemReport) -> String {
    format!(
        "# System Verification - {}\n\n\
         ## Hardware Specifications\n\
         - **CPU**: {} cores ({} physical)\n\
         - **RAM**: {} GB total, {} GB available\n\
         - **Storage**: {} GB total, {} GB free\n\n\
         ## Software Environment\n\
         - **OS**: {} {}\n\
         - **Interpreter**: {}\n",
        report.timestamp.to_rfc3339(),
        report.hardware.cpu_count,
        report.hardware.cpu_count_physical,
        report.hardware.ram_total_gb,
        report.hardware.ram_available_gb,
        report.hardware.disk_total_gb,
        report.hardware.disk_free_gb,
        report.system.os,
        report.system.os_version,
        if report.system.interpreter_version.is_empty() {
            "not found"
        } else {
            report.system.interpreter_version.as_str()
        },
    )
}

fn print_warnings(report: &SystemReport) {
    if report.below_ram_minimum() {
        println!(
            "\n{} System RAM below recommended {} GB minimum",
            "⚠".yellow().bold(),
            SystemReport::MIN_RAM_GB
        );
    }
    if report.below_core_minimum() {
        println!(
            "{} CPU cores below recommended {}-core minimum",
            "⚠".yellow().bold(),
            SystemReport::MIN_PHYSICAL_CORES
        );
    }
}
