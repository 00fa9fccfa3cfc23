use anyhow::{Context, Result};
use glob::glob;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::SystemTime;

use crate::models::ArtifactKind;

/// A file surfaced by the recency listing
#[derive(Debug, Clone)]
pub struct RecentFile {
    pub name: String,
    pub modified: SystemTime,
}

/// Count files per artifact kind, recursively under `root`.
///
/// Every kind is present in the result, zero included. A missing root yields
/// all-zero counts rather than an error.
pub fn count_by_kind(root: &Path) -> Result<BTreeMap<ArtifactKind, usize>> {
    let mut counts: BTreeMap<ArtifactKind, usize> = BTreeMap::new();
    for kind in ArtifactKind::ALL {
        counts.insert(kind, 0);
    }

    if !root.exists() {
        return Ok(counts);
    }

    let pattern = root.join("**").join("*");
    let pattern_str = pattern.to_string_lossy();

    for entry in glob(&pattern_str)
        .map_err(|e| anyhow::anyhow!("Invalid glob pattern '{pattern_str}': {e}"))?
    {
        let path = entry.context("Failed to read directory entry")?;
        if !path.is_file() {
            continue;
        }
        if let Some(kind) = ArtifactKind::from_path(&path) {
            *counts.entry(kind).or_insert(0) += 1;
        }
    }

    Ok(counts)
}

/// Collect the most recently modified files across the given directories,
/// newest first, capped at `limit`. Directories that do not exist are
/// skipped. Only the filename is reported.
pub fn recent_files(dirs: &[&Path], limit: usize) -> Result<Vec<RecentFile>> {
    let mut files = Vec::new();

    for dir in dirs {
        if !dir.exists() {
            continue;
        }

        let pattern = dir.join("**").join("*");
        let pattern_str = pattern.to_string_lossy();

        for entry in glob(&pattern_str)
            .map_err(|e| anyhow::anyhow!("Invalid glob pattern '{pattern_str}': {e}"))?
        {
            let path = entry.context("Failed to read directory entry")?;
            if !path.is_file() {
                continue;
            }

            let metadata = path
                .metadata()
                .with_context(|| format!("Failed to stat {}", path.display()))?;
            let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();

            files.push(RecentFile { name, modified });
        }
    }

    files.sort_by(|a, b| b.modified.cmp(&a.modified));
    files.truncate(limit);

    Ok(files)
}
