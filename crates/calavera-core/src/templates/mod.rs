//! Config file renderers, one per tool family
//!
//! Renderers are pure: the same flags always give byte-identical artifacts,
//! the same scripts and the same dependency list. Nothing here touches the
//! filesystem; writing is the installer's job.

pub mod editorconfig;
pub mod eslint;
pub mod prettier;
pub mod stylelint;
pub mod tsconfig;

use serde::Serialize;
use std::path::PathBuf;

pub use editorconfig::render_editorconfig;
pub use eslint::render_eslint;
pub use prettier::render_prettier;
pub use stylelint::render_stylelint;
pub use tsconfig::render_tsconfig;

/// A file to write, relative to the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigArtifact {
    pub path: PathBuf,
    pub content: String,
}

impl ConfigArtifact {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Serialize `value` as 2-space indented JSON with a trailing newline
    pub fn json<T: Serialize>(path: impl Into<PathBuf>, value: &T) -> serde_json::Result<Self> {
        let text = serde_json::to_string_pretty(value)?;
        Ok(Self::new(path, format!("{text}\n")))
    }
}

/// An entry for the `scripts` section of `package.json`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Script {
    pub name: &'static str,
    pub command: &'static str,
}

impl Script {
    pub const fn new(name: &'static str, command: &'static str) -> Self {
        Self { name, command }
    }
}

/// Everything one renderer contributes to a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    /// Human-readable label used in progress output
    pub label: &'static str,
    /// Config name used in error messages
    pub config: &'static str,
    pub artifacts: Vec<ConfigArtifact>,
    pub scripts: Vec<Script>,
    pub dependencies: Vec<&'static str>,
}

/// Ordered package list that ignores repeated names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyList {
    packages: Vec<String>,
}

impl DependencyList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a package unless it is already listed
    pub fn push(&mut self, package: &str) {
        if !self.packages.iter().any(|p| p == package) {
            self.packages.push(package.to_string());
        }
    }

    pub fn extend<'a>(&mut self, packages: impl IntoIterator<Item = &'a str>) {
        for package in packages {
            self.push(package);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.packages
    }
}
