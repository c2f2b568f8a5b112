use crate::{
    config::{Overrides, ReleaseConfig},
    release::{pipeline, summary},
    utils::{
        logger::{self, LogLevel, Logger},
        path::get_cwd,
        signature::get_signature,
        version::get_version,
    },
    vcs::{Vcs, git::GitCli},
};
use anyhow::Context;
use clap::{CommandFactory, FromArgMatches, Parser};
use std::path::PathBuf;
use std::process::ExitCode;

mod config;
mod error;
mod release;
mod types;
mod utils;
mod vcs;

#[derive(Parser)]
#[command(name = "verbump")]
#[command(author = "Labscend Studios")]
#[command(about = "Bump the project version, tag the previous release and commit")]
struct Cli {
    /// Project root (defaults to the nearest directory holding build.gradle.kts)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Build file holding the `version = "X.Y"` line, relative to the root
    #[arg(long)]
    build_file: Option<PathBuf>,

    /// Settings file holding `/vX.Y/` fragments, relative to the root
    #[arg(long)]
    settings_file: Option<PathBuf>,

    /// Commit message
    #[arg(short, long, allow_hyphen_values = true)]
    message: Option<String>,

    /// Prefix put in front of the version to form the tag name
    #[arg(long)]
    tag_prefix: Option<String>,

    #[arg(long, default_value_t = false)]
    /// Show what would change without writing files or running git
    dry_run: bool,

    #[arg(long, default_value_t = false)]
    /// Rewrite the files but do not tag or commit
    no_git: bool,

    #[arg(long, default_value_t = false)]
    /// Print the outcome as JSON on stdout
    json: bool,

    #[arg(short, long, default_value_t = false)]
    /// Only print warnings and errors
    quiet: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            root: self.root.clone(),
            build_file: self.build_file.clone(),
            settings_file: self.settings_file.clone(),
            commit_message: self.message.clone(),
            tag_prefix: self.tag_prefix.clone(),
            dry_run: self.dry_run,
            skip_git: self.no_git,
        }
    }
}

fn main() -> ExitCode {
    let version = get_version();
    let signature = get_signature(&version);

    let version_static: &'static str = Box::leak(format!("v{}", version).into_boxed_str());
    let signature_static: &'static str = Box::leak(signature.into_boxed_str());

    // only a leading flag, so `-m -V` stays a commit message
    let first_arg = std::env::args().nth(1);
    if matches!(first_arg.as_deref(), Some("--version" | "-V")) {
        println!("{}", signature_static);
        return ExitCode::SUCCESS;
    }

    let cmd = Cli::command()
        .version(version_static)
        .before_help(signature_static);
    let matches = cmd.get_matches();
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    logger::set_quiet(cli.quiet || cli.json);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Logger::new().log_message(LogLevel::Error, &format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let cwd = get_cwd();
    let config = ReleaseConfig::resolve(&cli.overrides(), config::process_env, &cwd)
        .context("Failed to resolve configuration")?;

    let git = if config.dry_run || config.skip_git {
        None
    } else {
        Some(GitCli::locate(&config.root).context("Cannot tag or commit")?)
    };

    let outcome = pipeline::run_release(&config, git.as_ref().map(|g| g as &dyn Vcs))
        .context("Release aborted")?;

    if cli.json {
        println!(
            "{}",
            summary::render_json(&outcome).context("Failed to render JSON")?
        );
    } else {
        summary::print_release_summary(&outcome);
    }

    Ok(())
}
