use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Subdirectories of the output tree, one per artifact category
pub const CATEGORIES: [&str; 5] = [
    "models",
    "circuits",
    "graphs",
    "validation_data",
    "reports",
];

/// The `outputs/` directory of a phase.
///
/// Generation scripts write artifacts into the category subdirectories;
/// phasekit only creates the tree and inspects it afterwards.
pub struct OutputTree {
    root: PathBuf,
}

impl OutputTree {
    pub fn new<P: AsRef<Path>>(phase_dir: P) -> Self {
        Self {
            root: phase_dir.as_ref().join("outputs"),
        }
    }

    /// Create the root and every category directory. Idempotent: an existing
    /// tree is left untouched and re-running never fails.
    pub fn ensure(&self) -> Result<()> {
        for category in &CATEGORIES {
            let path = self.root.join(category);
            fs::create_dir_all(&path)
                .with_context(|| format!("Failed to create {} directory", path.display()))?;
        }

        Ok(())
    }

    pub fn exists(&self) -> bool {
        self.root.exists()
    }

    pub fn models_dir(&self) -> PathBuf {
        self.root.join("models")
    }

    pub fn circuits_dir(&self) -> PathBuf {
        self.root.join("circuits")
    }

    pub fn graphs_dir(&self) -> PathBuf {
        self.root.join("graphs")
    }

    pub fn validation_data_dir(&self) -> PathBuf {
        self.root.join("validation_data")
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.root.join("reports")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
