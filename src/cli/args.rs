use crate::constants::{defaults, exit_codes, verbosity, TEMPLATES_DIR_ENV};
use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#;

/// Scaffold - create projects from templates and track what was generated.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a project from a template.
    Create(CreateArgs),

    /// List available templates.
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show generated/custom file status using the project manifest.
    Status(StatusArgs),
}

/// Arguments for the create command.
#[derive(Parser, Debug, Clone)]
pub struct CreateArgs {
    /// Project name.
    #[arg(long)]
    pub name: String,

    /// Template folder name.
    #[arg(long, default_value = defaults::TEMPLATE)]
    pub template: String,

    /// Directory where the new project folder should be created.
    #[arg(long, default_value = defaults::OUTPUT_DIR)]
    pub output: PathBuf,

    /// Templates directory path.
    #[arg(long = "templates-dir", env = TEMPLATES_DIR_ENV, default_value = defaults::TEMPLATES_DIR)]
    pub templates_dir: PathBuf,

    /// Author full name.
    #[arg(long, default_value = "")]
    pub author: String,

    /// Author email.
    #[arg(long, default_value = "")]
    pub email: String,

    /// Project description.
    #[arg(long, default_value = defaults::DESCRIPTION)]
    pub description: String,

    /// Python version constraint.
    #[arg(long, default_value = defaults::PYTHON_VERSION)]
    pub python: String,

    /// License identifier.
    #[arg(long, default_value = defaults::LICENSE)]
    pub license: String,

    /// Additional template variable in key=value format. Can be repeated.
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,

    /// Overwrite existing files.
    #[arg(long)]
    pub overwrite: bool,

    /// Preview actions without touching the filesystem.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// Arguments for the list command.
#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    /// Templates directory path.
    #[arg(long = "templates-dir", env = TEMPLATES_DIR_ENV, default_value = defaults::TEMPLATES_DIR)]
    pub templates_dir: PathBuf,
}

/// Arguments for the status command.
#[derive(Parser, Debug, Clone)]
pub struct StatusArgs {
    /// Path to a scaffolded project directory (contains .scaffold/manifest.json).
    #[arg(long, default_value = ".")]
    pub project: PathBuf,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Parse command line arguments, printing help when a required input is missing.
pub fn get_cli() -> Cli {
    Cli::try_parse().unwrap_or_else(|e| {
        if e.kind() == ErrorKind::MissingSubcommand {
            let mut command = Cli::command().help_template(HELP_TEMPLATE);
            if let Err(print_err) = command.print_help() {
                eprintln!("Failed to display help information: {print_err}");
            } else {
                println!();
            }
            std::process::exit(exit_codes::FAILURE);
        } else {
            e.exit();
        }
    })
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}
