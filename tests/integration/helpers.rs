//! Shared test helpers: temporary projects wired to fake tools

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary project directory with a phasekit.toml pointing at fake
/// runtime tools
pub struct TestProject {
    pub dir: TempDir,
    pub pip_log: PathBuf,
}

impl TestProject {
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn phase_dir(&self) -> PathBuf {
        self.root().join("phases/phase1")
    }

    /// Package names the fake pip was asked to install, in order
    pub fn installed_packages(&self) -> Vec<String> {
        fs::read_to_string(&self.pip_log)
            .unwrap_or_default()
            .lines()
            .map(|l| l.to_string())
            .collect()
    }

    pub fn generation_marker(&self) -> PathBuf {
        self.root().join("generation-ran")
    }
}

pub fn write_executable(path: &Path, body: &str) {
    fs::write(path, format!("#!/bin/sh\n{body}\n")).expect("Failed to write script");
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .expect("Failed to chmod script");
}

/// Create a project whose fake pip fails for every package named in
/// `failing_packages`, and whose generation entry point touches a marker
/// file then writes `entry_body`.
pub fn project_with_fake_tools(
    required: &[&str],
    optional: &[&str],
    failing_packages: &[&str],
    entry_body: &str,
) -> TestProject {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let root = dir.path();

    let pip_log = root.join("pip-install.log");
    let fake_pip = root.join("fake-pip");
    let fail_cases = failing_packages.join("|");
    write_executable(
        &fake_pip,
        &format!(
            "[ \"$1\" = \"install\" ] || exit 0\n\
             echo \"$2\" >> {log}\ncase \"$2\" in {cases}) exit 1 ;; esac\nexit 0",
            log = pip_log.display(),
            cases = if fail_cases.is_empty() {
                "never-fails".to_string()
            } else {
                fail_cases
            },
        ),
    );

    let phase_dir = root.join("phases/phase1");
    fs::create_dir_all(&phase_dir).expect("Failed to create phase dir");

    let marker = root.join("generation-ran");
    write_executable(
        &phase_dir.join("generate.sh"),
        &format!("touch {}\n{entry_body}", marker.display()),
    );

    let toml_list = |items: &[&str]| {
        items
            .iter()
            .map(|p| format!("\"{p}\""))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let config = format!(
        "[runtime]\n\
         interpreter = \"sh\"\n\
         package_manager = \"{pip}\"\n\n\
         [packages]\n\
         required = [{required}]\n\
         optional = [{optional}]\n\n\
         [scripts]\n\
         executable = [\"generate.sh\"]\n\
         entry_point = \"generate.sh\"\n",
        pip = fake_pip.display(),
        required = toml_list(required),
        optional = toml_list(optional),
    );
    fs::write(root.join("phasekit.toml"), config).expect("Failed to write phasekit.toml");

    TestProject { dir, pip_log }
}
