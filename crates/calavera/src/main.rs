//! Calavera CLI - linting and formatting setup for JavaScript projects

use anyhow::Result;
use calavera_core::tui::SetupArgs;
use calavera_core::PackageManager;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "calavera")]
#[command(about = "Set up EditorConfig, Prettier, ESLint, TypeScript and Stylelint in a project")]
#[command(version)]
pub struct Args {
    /// Project directory (defaults to the current directory)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Tools to set up, skipping the prompt (comma-separated: editorconfig,prettier,eslint,
    /// eslint-html,eslint-css,tsconfig,tsconfig-noemit,stylelint)
    #[arg(short, long, value_delimiter = ',')]
    pub tools: Option<Vec<String>>,

    /// Package manager to install with (npm, pnpm, yarn, bun); detected from the lockfile by default
    #[arg(short, long)]
    pub package_manager: Option<PackageManager>,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,

    /// Write configuration and scripts without installing packages
    #[arg(long = "skip-install")]
    pub skip_install: bool,
}

impl From<Args> for SetupArgs {
    fn from(args: Args) -> Self {
        SetupArgs {
            directory: args.directory,
            tools: args.tools,
            package_manager: args.package_manager,
            yes: args.yes,
            skip_install: args.skip_install,
        }
    }
}

/// Print the error with its cause chain
fn report(error: &anyhow::Error) {
    let mut message = error.to_string();
    for cause in error.chain().skip(1) {
        message.push_str(&format!("\n  caused by: {cause}"));
    }
    if cliclack::log::error(&message).is_err() {
        eprintln!("error: {message}");
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Ctrl+C counts as cancelling the setup, which is not a failure
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(0);
    })
    .ok();

    let args = Args::parse();
    let result: Result<()> = calavera_core::run(args.into()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}
