//! Calavera Core - linting and formatting setup for JavaScript projects
//!
//! This library renders configuration for EditorConfig, Prettier, ESLint,
//! TypeScript and Stylelint, merges the matching scripts into `package.json`
//! and installs the required packages as dev dependencies.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Pure template renderers, the `package.json` accessor, package manager detection
//! - **Layer 2: Workflow Orchestration** - `Installer`, which applies a `ToolSelection` in one pass
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based wizard (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based wizard module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use calavera_core::{CommandInstaller, Installer, PackageManager, ToolSelection};
//!
//! let selection = ToolSelection::parse(&["prettier", "eslint"])?;
//! let installer = Installer::new(".", CommandInstaller::new(PackageManager::Npm));
//! let outcome = installer.run(&selection, &mut ()).await?;
//! ```

pub mod error;
pub mod installer;
pub mod manifest;
pub mod runtime;
pub mod templates;
pub mod tools;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::SetupError;
pub use installer::{Installer, Outcome, Plan, Progress, Report};
pub use manifest::Manifest;
pub use runtime::{CommandInstaller, PackageInstaller, PackageManager};
pub use templates::{ConfigArtifact, DependencyList, Rendered};
pub use tools::{FeatureFlags, Tool, ToolSelection};

#[cfg(feature = "tui")]
pub use tui::run;
