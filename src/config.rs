use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the optional config file looked up in the working directory
pub const CONFIG_FILE: &str = "phasekit.toml";

/// Top-level configuration for a phase.
///
/// Every field carries a default matching the Phase 1 layout, so running
/// without a `phasekit.toml` is fully supported.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhaseConfig {
    #[serde(default)]
    pub phase: PhaseSection,
    #[serde(default)]
    pub runtime: RuntimeSection,
    #[serde(default)]
    pub packages: PackagesSection,
    #[serde(default)]
    pub scripts: ScriptsSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhaseSection {
    /// Phase root directory, relative to the working directory
    #[serde(default = "default_phase_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_phase_name")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuntimeSection {
    #[serde(default = "default_interpreter")]
    pub interpreter: String,
    #[serde(default = "default_package_manager")]
    pub package_manager: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackagesSection {
    /// Packages whose install failure aborts setup
    #[serde(default = "default_required_packages")]
    pub required: Vec<String>,
    /// Packages whose install failure is downgraded to a notice
    #[serde(default = "default_optional_packages")]
    pub optional: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptsSection {
    /// Scripts to mark executable, relative to the phase dir
    #[serde(default = "default_executable_scripts")]
    pub executable: Vec<PathBuf>,
    /// Generation/validation entry point, relative to the phase dir
    #[serde(default = "default_entry_point")]
    pub entry_point: PathBuf,
}

fn default_phase_dir() -> PathBuf {
    PathBuf::from("phases/phase1")
}

fn default_phase_name() -> String {
    "Phase 1 - Digital Prototyping".to_string()
}

fn default_interpreter() -> String {
    "python3".to_string()
}

fn default_package_manager() -> String {
    "pip3".to_string()
}

fn default_required_packages() -> Vec<String> {
    ["numpy", "scipy", "matplotlib"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_optional_packages() -> Vec<String> {
    vec!["qiskit".to_string()]
}

fn default_executable_scripts() -> Vec<PathBuf> {
    vec![
        PathBuf::from("multiphysics/aem_model.py"),
        PathBuf::from("quantum_algorithms/quantum_optimizer.py"),
        PathBuf::from("validate_phase1.py"),
    ]
}

fn default_entry_point() -> PathBuf {
    PathBuf::from("validate_phase1.py")
}

impl Default for PhaseSection {
    fn default() -> Self {
        Self {
            dir: default_phase_dir(),
            name: default_phase_name(),
        }
    }
}

impl Default for RuntimeSection {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
            package_manager: default_package_manager(),
        }
    }
}

impl Default for PackagesSection {
    fn default() -> Self {
        Self {
            required: default_required_packages(),
            optional: default_optional_packages(),
        }
    }
}

impl Default for ScriptsSection {
    fn default() -> Self {
        Self {
            executable: default_executable_scripts(),
            entry_point: default_entry_point(),
        }
    }
}

impl Default for PhaseConfig {
    fn default() -> Self {
        Self {
            phase: PhaseSection::default(),
            runtime: RuntimeSection::default(),
            packages: PackagesSection::default(),
            scripts: ScriptsSection::default(),
        }
    }
}

impl PhaseConfig {
    /// Load `phasekit.toml` from `base_dir`, falling back to defaults when
    /// the file does not exist. A present-but-malformed file is an error.
    pub fn load_or_default<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let path = base_dir.as_ref().join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: PhaseConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(config)
    }

    /// Phase root resolved against a base directory, honoring a CLI override
    pub fn phase_dir(&self, base_dir: &Path, override_dir: Option<&Path>) -> PathBuf {
        let dir = override_dir.unwrap_or(&self.phase.dir);
        base_dir.join(dir)
    }
}
