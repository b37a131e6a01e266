//! Runtime detection for Node.js and the selected package manager

use super::package_manager::PackageManager;
use std::process::Command;

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

impl RuntimeInfo {
    /// "name (version)" or "name (not installed)"
    pub fn summary(&self) -> String {
        if self.available {
            format!("{} ({})", self.name, self.version.as_deref().unwrap_or("unknown"))
        } else {
            format!("{} (not installed)", self.name)
        }
    }
}

fn probe(name: &'static str, binary: &str) -> RuntimeInfo {
    let output = Command::new(binary).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name,
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if Node.js is available
pub fn check_node() -> RuntimeInfo {
    probe("Node.js", "node")
}

/// Check if the package manager binary is available
pub fn check_package_manager(package_manager: PackageManager) -> RuntimeInfo {
    probe(package_manager.command(), package_manager.command())
}

/// Probe Node.js (skipped for bun, which ships its own runtime) and the
/// package manager. Missing runtimes are reported, not treated as errors.
pub fn check_runtimes(package_manager: PackageManager) -> Vec<RuntimeInfo> {
    let mut results = Vec::new();
    if package_manager != PackageManager::Bun {
        results.push(check_node());
    }
    results.push(check_package_manager(package_manager));
    results
}
