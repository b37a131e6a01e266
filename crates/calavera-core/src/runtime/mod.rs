//! Runtime detection and package manager integration
//!
//! This module provides:
//! - Node.js and package manager detection
//! - The install collaborator used by the orchestrator

pub mod check;
pub mod package_manager;

pub use check::{check_node, check_package_manager, check_runtimes, RuntimeInfo};
pub use package_manager::{CommandInstaller, PackageInstaller, PackageManager};
