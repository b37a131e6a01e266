//! Charm-style CLI prompts using cliclack

use crate::installer::{Installer, Outcome, Progress, Report};
use crate::manifest::Manifest;
use crate::runtime::{check, CommandInstaller, PackageInstaller, PackageManager};
use crate::tools::{Tool, ToolSelection};
use anyhow::Result;
use std::io;
use std::path::{Path, PathBuf};

/// CLI arguments for a setup run
#[derive(Debug, Clone, Default)]
pub struct SetupArgs {
    /// Project directory (defaults to the current directory)
    pub directory: Option<PathBuf>,

    /// Tool identifiers; skips the multiselect prompt when given
    pub tools: Option<Vec<String>>,

    /// Package manager override; detected from the lockfile otherwise
    pub package_manager: Option<PackageManager>,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,

    /// Write configs and scripts without installing packages
    pub skip_install: bool,
}

/// Esc or Ctrl+C inside a prompt comes back as `Interrupted`
fn cancelled<T>(result: io::Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn cancel_setup() -> Result<()> {
    cliclack::outro_cancel("Setup cancelled 👋")?;
    Ok(())
}

/// Run the setup wizard
pub async fn run(args: SetupArgs) -> Result<()> {
    cliclack::intro("Let's get you linting and formatting! 🧶")?;

    // Step 1: Resolve the project directory
    let root = resolve_directory(&args)?;

    // Step 2: Validate --tools before anything touches the project
    let preselected = match &args.tools {
        Some(ids) => Some(ToolSelection::parse(ids)?),
        None => None,
    };

    let package_manager = match args.package_manager {
        Some(pm) => pm,
        None => PackageManager::detect(&root),
    };
    let packages = CommandInstaller::new(package_manager);

    // Step 3: Make sure there is a package.json to merge scripts into
    if !check_prerequisites(&root, &packages, &args).await? {
        return cancel_setup();
    }

    // Step 4: Choose tools
    let selection = match preselected {
        Some(selection) => {
            let names: Vec<&str> = selection.iter().map(|t| t.display_name()).collect();
            cliclack::log::info(format!("Tools: {}", names.join(", ")))?;
            selection
        }
        None => match select_tools()? {
            Some(selection) => selection,
            None => return cancel_setup(),
        },
    };

    // Step 5: Check runtimes (advisory only)
    if !args.skip_install {
        check_runtimes(package_manager)?;
    }

    // Step 6: Write configs, merge scripts, install
    let installer = Installer::new(&root, packages).skip_install(args.skip_install);
    let mut progress = CliProgress { package_manager };

    match installer.run(&selection, &mut progress).await? {
        Outcome::Completed(report) => print_next_steps(package_manager, &report, args.skip_install),
        Outcome::Cancelled => cancel_setup(),
    }
}

fn resolve_directory(args: &SetupArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let path = match &args.directory {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => current_dir.join(dir),
        None => current_dir,
    };

    if !path.is_dir() {
        anyhow::bail!("Project directory does not exist: {}", path.display());
    }

    if args.directory.is_some() {
        cliclack::log::info(format!("Using directory: {}", path.display()))?;
    }

    Ok(path)
}

/// Returns `false` when the user declines to create a `package.json`
async fn check_prerequisites(
    root: &Path,
    packages: &CommandInstaller,
    args: &SetupArgs,
) -> Result<bool> {
    cliclack::log::info("Checking for presence of an existing package.json...")?;

    if Manifest::exists(root) {
        return Ok(true);
    }

    let create = if args.yes {
        true
    } else {
        let answer = cliclack::confirm(
            "No package.json found. You will need one to continue, create a default?",
        )
        .initial_value(true)
        .interact();
        cancelled(answer)?.unwrap_or(false)
    };

    if !create {
        return Ok(false);
    }

    cliclack::log::step(format!(
        "📦 Creating package.json with {}...",
        packages.package_manager()
    ))?;
    packages.init(root).await?;
    cliclack::log::success("📦 Created package.json")?;

    Ok(true)
}

/// Interactive tool selection; `None` when the user backs out
fn select_tools() -> Result<Option<ToolSelection>> {
    let mut multi = cliclack::multiselect("Choose your tools from the skeleton closet");
    for tool in Tool::ALL {
        multi = multi.item(tool, tool.display_name(), tool.hint());
    }

    let Some(mut picked) = cancelled(multi.required(true).interact())? else {
        return Ok(None);
    };

    if picked.contains(&Tool::TsConfig) && picked.contains(&Tool::TsConfigNoEmit) {
        cliclack::log::warning("Both TSConfig variants were selected, only one can be used")?;

        let keep = cliclack::select("Which TypeScript setup do you want?")
            .item(
                Tool::TsConfig,
                Tool::TsConfig.display_name(),
                "tsc emits the JavaScript",
            )
            .item(
                Tool::TsConfigNoEmit,
                Tool::TsConfigNoEmit.display_name(),
                "A bundler emits, tsc only type-checks",
            )
            .interact();
        let Some(keep) = cancelled(keep)? else {
            return Ok(None);
        };

        picked.retain(|tool| {
            !matches!(tool, Tool::TsConfig | Tool::TsConfigNoEmit) || *tool == keep
        });
    }

    Ok(Some(ToolSelection::new(picked)?))
}

fn check_runtimes(package_manager: PackageManager) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Checking runtimes...");

    let runtimes = check::check_runtimes(package_manager);
    let summary: Vec<String> = runtimes.iter().map(|r| r.summary()).collect();
    spinner.stop(format!("Detected runtimes: {}", summary.join(", ")));

    if runtimes.iter().any(|r| !r.available) {
        cliclack::log::warning(format!(
            "{} may fail to install packages. Re-run with --skip-install to only write configs.",
            package_manager
        ))?;
    }

    Ok(())
}

/// Reports installer progress through cliclack log lines
///
/// `Progress` hooks return `()`, so a failed terminal write is dropped
/// and the run carries on.
struct CliProgress {
    package_manager: PackageManager,
}

impl Progress for CliProgress {
    fn tool_started(&mut self, label: &str) {
        let _ = cliclack::log::step(format!("🧶 Adding {label} to the project..."));
    }

    fn install_started(&mut self, packages: &[String]) {
        let _ = cliclack::log::info(format!(
            "📦 Installing {} packages with {}...",
            packages.len(),
            self.package_manager
        ));
    }

    fn install_finished(&mut self, _packages: &[String]) {
        let _ = cliclack::log::success("Dependencies installed 👍");
    }
}

fn print_next_steps(
    package_manager: PackageManager,
    report: &Report,
    skipped_install: bool,
) -> Result<()> {
    cliclack::log::success(format!(
        "Wrote {} files: {}",
        report.files.len(),
        report
            .files
            .iter()
            .map(|f| f.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    ))?;

    let mut steps = Vec::new();

    if skipped_install && !report.dependencies.is_empty() {
        let args = package_manager.install_args(report.dependencies.as_slice());
        steps.push(format!("{} {}", package_manager, args.join(" ")));
    }

    for script in &report.scripts {
        steps.push(format!("{} run {}", package_manager, script.name));
    }

    if !steps.is_empty() {
        println!();
        println!("  Next steps");
        println!();

        for (i, step) in steps.iter().enumerate() {
            println!("  {}.  {}", i + 1, step);
        }
    }

    cliclack::outro("All done! 🎉 Happy coding 🙌")?;

    Ok(())
}
