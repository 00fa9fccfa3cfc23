use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Artifact categories recognized in the output tree, classified purely by
/// file extension. Unknown extensions are ignored everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Json,
    Png,
    Csv,
    Qasm,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::Json,
        ArtifactKind::Png,
        ArtifactKind::Csv,
        ArtifactKind::Qasm,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactKind::Json => "json",
            ArtifactKind::Png => "png",
            ArtifactKind::Csv => "csv",
            ArtifactKind::Qasm => "qasm",
        }
    }

    /// Classify a path by extension, case-insensitively
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        Self::ALL.into_iter().find(|kind| kind.extension() == ext)
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension().to_uppercase())
    }
}

/// Machine-readable result of one audit pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub phase: String,
    pub timestamp: DateTime<Utc>,
    pub outputs_present: bool,
    /// File count per artifact kind; all four kinds always present
    pub counts: BTreeMap<ArtifactKind, usize>,
    /// Most recently modified filenames, newest first, capped at five
    pub recent: Vec<String>,
}

impl AuditReport {
    pub fn total_files(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Host specifications collected by `phasekit check`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemReport {
    pub timestamp: DateTime<Utc>,
    pub phase: String,
    pub system: SystemSection,
    pub hardware: HardwareSection,
    pub git: GitSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemSection {
    pub os: String,
    pub os_version: String,
    pub architecture: String,
    /// Interpreter version string, empty when the interpreter is absent
    pub interpreter_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HardwareSection {
    pub cpu_count: usize,
    pub cpu_count_physical: usize,
    pub ram_total_gb: f64,
    pub ram_available_gb: f64,
    pub disk_total_gb: f64,
    pub disk_free_gb: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitSection {
    pub username: String,
    pub email: String,
}

impl SystemReport {
    /// Recommended minimum total RAM for the modeling workloads
    pub const MIN_RAM_GB: f64 = 16.0;
    /// Recommended minimum physical core count
    pub const MIN_PHYSICAL_CORES: usize = 4;

    pub fn below_ram_minimum(&self) -> bool {
        self.hardware.ram_total_gb < Self::MIN_RAM_GB
    }

    pub fn below_core_minimum(&self) -> bool {
        self.hardware.cpu_count_physical < Self::MIN_PHYSICAL_CORES
    }
}
