//! Runtime probing and external process invocation.
//!
//! Everything here is blocking: package installs and the generation entry
//! point run to completion before the next setup step starts, with no
//! timeout applied.

use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Script path does not exist: {0}")]
    ScriptMissing(PathBuf),

    #[error("Failed to launch '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("Failed to install package '{package}' ({status})")]
    InstallFailed { package: String, status: String },

    #[error("Generation entry point exited with {status}")]
    EntryPointFailed { status: String },

    #[error("Failed to update permissions for {path}: {source}")]
    Permissions {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A tool looked up on PATH, with its version output when available
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: String,
    pub path: Option<PathBuf>,
    pub version: Option<String>,
}

impl ToolInfo {
    pub fn found(&self) -> bool {
        self.path.is_some()
    }
}

/// Locate `name` on PATH and capture the first line of its `--version`
/// output. Absence is not an error; callers decide how to react.
pub fn detect_tool(name: &str) -> ToolInfo {
    let path = which::which(name).ok();

    let version = path.as_ref().and_then(|p| {
        let output = Command::new(p).arg("--version").output().ok()?;
        // Some interpreters print the version on stderr
        let text = if output.stdout.is_empty() {
            String::from_utf8_lossy(&output.stderr).to_string()
        } else {
            String::from_utf8_lossy(&output.stdout).to_string()
        };
        text.lines().next().map(|line| line.trim().to_string())
    });

    debug!(tool = name, found = path.is_some(), "probed runtime tool");

    ToolInfo {
        name: name.to_string(),
        path,
        version,
    }
}

/// Install a single package via the configured package manager.
///
/// The child inherits stdio so installer output stays visible. A non-zero
/// exit or a spawn failure is returned as an error; the caller chooses
/// whether that aborts the sequence (required) or becomes a notice
/// (optional).
pub fn install_package(manager: &str, package: &str) -> Result<(), RuntimeError> {
    debug!(manager, package, "installing package");

    let status = Command::new(manager)
        .args(["install", package])
        .status()
        .map_err(|source| RuntimeError::Spawn {
            command: format!("{manager} install {package}"),
            source,
        })?;

    if !status.success() {
        return Err(RuntimeError::InstallFailed {
            package: package.to_string(),
            status: status.to_string(),
        });
    }

    Ok(())
}

/// Set the executable bit on a script. The path must already exist.
pub fn make_executable(path: &Path) -> Result<(), RuntimeError> {
    if !path.exists() {
        return Err(RuntimeError::ScriptMissing(path.to_path_buf()));
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let metadata = path
            .metadata()
            .map_err(|source| RuntimeError::Permissions {
                path: path.to_path_buf(),
                source,
            })?;
        let mut permissions = metadata.permissions();
        permissions.set_mode(permissions.mode() | 0o755);
        std::fs::set_permissions(path, permissions).map_err(|source| {
            RuntimeError::Permissions {
                path: path.to_path_buf(),
                source,
            }
        })?;
    }

    Ok(())
}

/// Run the generation/validation entry point as a blocking child with
/// inherited stdio, surfacing a non-zero exit status as an error.
pub fn run_entry_point(interpreter: &str, script: &Path) -> Result<(), RuntimeError> {
    debug!(interpreter, script = %script.display(), "running entry point");

    let status = Command::new(interpreter)
        .arg(script)
        .status()
        .map_err(|source| RuntimeError::Spawn {
            command: format!("{interpreter} {}", script.display()),
            source,
        })?;

    if !status.success() {
        return Err(RuntimeError::EntryPointFailed {
            status: status.to_string(),
        });
    }

    Ok(())
}
