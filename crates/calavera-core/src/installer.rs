//! Installer orchestration
//!
//! One pass over the selection: render every selected tool in a fixed order,
//! write the artifacts, register scripts on a single in-memory manifest that
//! is saved once, then hand the aggregated dependency list to the package
//! manager in one invocation.

use crate::error::{Result, SetupError};
use crate::manifest::Manifest;
use crate::runtime::PackageInstaller;
use crate::templates::{
    render_editorconfig, render_eslint, render_prettier, render_stylelint, render_tsconfig,
    ConfigArtifact, DependencyList, Rendered, Script,
};
use crate::tools::{Tool, ToolSelection};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Hooks for reporting progress while a run executes
pub trait Progress {
    fn tool_started(&mut self, _label: &str) {}

    fn artifact_written(&mut self, _path: &Path) {}

    fn install_started(&mut self, _packages: &[String]) {}

    fn install_finished(&mut self, _packages: &[String]) {}
}

/// Silent progress, for tests and headless callers
impl Progress for () {}

/// Rendered output for a whole selection, in application order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub steps: Vec<Rendered>,
    pub dependencies: DependencyList,
}

impl Plan {
    /// Render the selection without touching the filesystem.
    ///
    /// Prettier goes first and the linter only after every flag is known;
    /// the remaining tools follow in a fixed priority order regardless of
    /// how they were selected.
    pub fn new(selection: &ToolSelection) -> Result<Self> {
        let flags = selection.flags();
        let mut steps = Vec::new();

        if selection.contains(Tool::Prettier) {
            steps.push(render_prettier());
        }

        if selection.contains(Tool::EditorConfig) {
            steps.push(render_editorconfig());
        }

        if selection.wants_linter() {
            steps.push(render_eslint(&flags));
        }

        if selection.contains(Tool::TsConfig) || selection.contains(Tool::TsConfigNoEmit) {
            let no_emit = selection.contains(Tool::TsConfigNoEmit);
            steps.push(
                render_tsconfig(no_emit)
                    .map_err(|e| SetupError::config_write("TypeScript configuration", e))?,
            );
        }

        if selection.contains(Tool::Stylelint) {
            steps.push(
                render_stylelint()
                    .map_err(|e| SetupError::config_write("Stylelint configuration", e))?,
            );
        }

        let mut dependencies = DependencyList::new();
        for step in &steps {
            dependencies.extend(step.dependencies.iter().copied());
        }

        Ok(Self {
            steps,
            dependencies,
        })
    }

    pub fn artifacts(&self) -> impl Iterator<Item = &ConfigArtifact> {
        self.steps.iter().flat_map(|step| step.artifacts.iter())
    }
}

/// What a completed run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub tools: Vec<&'static str>,
    pub files: Vec<PathBuf>,
    pub scripts: Vec<Script>,
    pub dependencies: DependencyList,
    pub installed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed(Report),
    Cancelled,
}

/// Applies a selection to the project in `root`
pub struct Installer<P> {
    root: PathBuf,
    packages: P,
    skip_install: bool,
}

impl<P: PackageInstaller> Installer<P> {
    pub fn new(root: impl Into<PathBuf>, packages: P) -> Self {
        Self {
            root: root.into(),
            packages,
            skip_install: false,
        }
    }

    /// Write configs and scripts but leave dependencies uninstalled
    pub fn skip_install(mut self, skip: bool) -> Self {
        self.skip_install = skip;
        self
    }

    pub async fn run(
        &self,
        selection: &ToolSelection,
        progress: &mut impl Progress,
    ) -> Result<Outcome> {
        if selection.is_empty() {
            return Ok(Outcome::Cancelled);
        }

        let plan = Plan::new(selection)?;

        // Scripts go into the in-memory manifest before any artifact is written
        let mut manifest = Manifest::load(&self.root).await?;
        for step in &plan.steps {
            for script in &step.scripts {
                manifest.set_script(script.name, script.command)?;
            }
        }

        let mut report = Report {
            scripts: plan.steps.iter().flat_map(|s| s.scripts.iter().copied()).collect(),
            dependencies: plan.dependencies.clone(),
            ..Report::default()
        };

        for step in &plan.steps {
            progress.tool_started(step.label);
            for artifact in &step.artifacts {
                self.write_artifact(step.config, artifact).await?;
                progress.artifact_written(&artifact.path);
                report.files.push(artifact.path.clone());
            }
            report.tools.push(step.label);
        }

        manifest.save().await?;

        if !plan.dependencies.is_empty() && !self.skip_install {
            let packages = plan.dependencies.as_slice();
            progress.install_started(packages);
            self.packages.install(&self.root, packages).await?;
            progress.install_finished(packages);
            report.installed = true;
        }

        Ok(Outcome::Completed(report))
    }

    async fn write_artifact(&self, config: &str, artifact: &ConfigArtifact) -> Result<()> {
        let path = self.root.join(&artifact.path);
        let wrap = |e: io::Error| SetupError::config_write(format!("{config} configuration"), e);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(wrap)?;
        }
        fs::write(&path, &artifact.content).await.map_err(wrap)?;

        Ok(())
    }
}
