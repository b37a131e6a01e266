//! Package manager detection and the install step
//!
//! The orchestrator only talks to [`PackageInstaller`]; [`CommandInstaller`]
//! is the real implementation that shells out to npm, pnpm, yarn or bun and
//! streams their output.

use crate::error::{Result, SetupError};
use colored::Colorize;
use std::collections::VecDeque;
use std::fmt;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::str::FromStr;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Upper bound for a single install or init run (5 minutes)
const INSTALL_TIMEOUT: Duration = Duration::from_secs(300);

/// Trailing stderr lines kept for the failure message
const STDERR_TAIL: usize = 50;

/// Lockfiles checked in order; the first one present wins
const LOCKFILES: &[(&str, PackageManager)] = &[
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("yarn.lock", PackageManager::Yarn),
    ("bun.lockb", PackageManager::Bun),
    ("bun.lock", PackageManager::Bun),
    ("package-lock.json", PackageManager::Npm),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PackageManager {
    #[default]
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManager {
    /// Name of the binary on PATH
    pub fn command(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
        }
    }

    /// Pick the package manager whose lockfile is present, npm otherwise
    pub fn detect(dir: &Path) -> Self {
        LOCKFILES
            .iter()
            .find(|(lockfile, _)| dir.join(lockfile).is_file())
            .map(|(_, pm)| *pm)
            .unwrap_or_default()
    }

    /// Arguments that add `packages` as dev dependencies
    pub fn install_args(&self, packages: &[String]) -> Vec<String> {
        let base: &[&str] = match self {
            PackageManager::Npm => &["install", "--save-dev"],
            PackageManager::Pnpm => &["add", "--save-dev"],
            PackageManager::Yarn => &["add", "--dev"],
            PackageManager::Bun => &["add", "--dev"],
        };
        base.iter()
            .map(|s| s.to_string())
            .chain(packages.iter().cloned())
            .collect()
    }

    /// Arguments that create a default `package.json`
    pub fn init_args(&self) -> Vec<String> {
        let args: &[&str] = match self {
            PackageManager::Pnpm => &["init"],
            _ => &["init", "-y"],
        };
        args.iter().map(|s| s.to_string()).collect()
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command())
    }
}

impl FromStr for PackageManager {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "npm" => Ok(PackageManager::Npm),
            "pnpm" => Ok(PackageManager::Pnpm),
            "yarn" => Ok(PackageManager::Yarn),
            "bun" => Ok(PackageManager::Bun),
            other => Err(format!(
                "unknown package manager '{other}' (expected npm, pnpm, yarn or bun)"
            )),
        }
    }
}

/// The install collaborator used by the orchestrator
pub trait PackageInstaller {
    /// Install `packages` as dev dependencies in one invocation
    fn install(&self, root: &Path, packages: &[String]) -> impl Future<Output = Result<()>>;

    /// Create a default `package.json` in `root`
    fn init(&self, root: &Path) -> impl Future<Output = Result<()>>;
}

/// Runs the real package manager binary
#[derive(Debug, Clone)]
pub struct CommandInstaller {
    package_manager: PackageManager,
    program: PathBuf,
    quiet: bool,
}

impl CommandInstaller {
    pub fn new(package_manager: PackageManager) -> Self {
        Self {
            package_manager,
            program: PathBuf::from(package_manager.command()),
            quiet: false,
        }
    }

    /// Suppress the streamed output (the process still runs)
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn package_manager(&self) -> PackageManager {
        self.package_manager
    }

    /// Shell-style rendering of a command, for messages
    pub fn display_command(&self, args: &[String]) -> String {
        format!("{} {}", self.package_manager.command(), args.join(" "))
    }

    /// Run the package manager with `args` in `root`, streaming its output
    async fn run(&self, root: &Path, args: Vec<String>) -> Result<()> {
        let cmd = self.display_command(&args);
        if !self.quiet {
            println!();
            println!("{} {}", "Running:".dimmed(), cmd.yellow());
            println!();
        }

        let mut child = TokioCommand::new(&self.program)
            .args(&args)
            .current_dir(root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| SetupError::Install {
                message: format!("Could not start `{cmd}`"),
                source: Some(e),
            })?;

        let stdout = child.stdout.take().ok_or_else(|| pipe_error(&cmd))?;
        let stderr = child.stderr.take().ok_or_else(|| pipe_error(&cmd))?;

        let mut stdout_reader = BufReader::new(stdout).lines();
        let mut stderr_reader = BufReader::new(stderr).lines();
        let quiet = self.quiet;
        let mut stderr_tail: VecDeque<String> = VecDeque::with_capacity(STDERR_TAIL);

        // Drain both pipes until each one closes, then wait for the exit status
        let run_task = async {
            let mut stdout_open = true;
            let mut stderr_open = true;
            while stdout_open || stderr_open {
                tokio::select! {
                    line = stdout_reader.next_line(), if stdout_open => {
                        match line {
                            Ok(Some(line)) if !quiet => println!("  {}", line),
                            Ok(Some(_)) => {}
                            Ok(None) => stdout_open = false,
                            Err(e) => {
                                eprintln!("{} {}", "Error reading stdout:".red(), e);
                                stdout_open = false;
                            }
                        }
                    }
                    line = stderr_reader.next_line(), if stderr_open => {
                        match line {
                            Ok(Some(line)) => {
                                if !quiet {
                                    eprintln!("  {}", line.yellow());
                                }
                                if stderr_tail.len() == STDERR_TAIL {
                                    stderr_tail.pop_front();
                                }
                                stderr_tail.push_back(line);
                            }
                            Ok(None) => stderr_open = false,
                            Err(e) => {
                                eprintln!("{} {}", "Error reading stderr:".red(), e);
                                stderr_open = false;
                            }
                        }
                    }
                }
            }
            child.wait().await
        };

        let outcome = timeout(INSTALL_TIMEOUT, run_task).await;
        match outcome {
            Ok(Ok(status)) if status.success() => {
                if !quiet {
                    println!();
                }
                Ok(())
            }
            Ok(Ok(status)) => {
                let mut message = format!(
                    "`{}` failed with exit code {}",
                    cmd,
                    status.code().unwrap_or(-1)
                );
                for line in &stderr_tail {
                    message.push('\n');
                    message.push_str(line);
                }
                Err(SetupError::Install {
                    message,
                    source: None,
                })
            }
            Ok(Err(e)) => Err(SetupError::Install {
                message: format!("Failed to wait for `{cmd}`"),
                source: Some(e),
            }),
            Err(_) => Err(SetupError::Install {
                message: format!(
                    "`{}` timed out after {} seconds",
                    cmd,
                    INSTALL_TIMEOUT.as_secs()
                ),
                source: None,
            }),
        }
    }
}

fn pipe_error(cmd: &str) -> SetupError {
    SetupError::Install {
        message: format!("Could not capture output of `{cmd}`"),
        source: Some(io::Error::new(io::ErrorKind::BrokenPipe, "missing pipe")),
    }
}

impl PackageInstaller for CommandInstaller {
    async fn install(&self, root: &Path, packages: &[String]) -> Result<()> {
        self.run(root, self.package_manager.install_args(packages))
            .await
    }

    async fn init(&self, root: &Path) -> Result<()> {
        self.run(root, self.package_manager.init_args()).await
    }
}
