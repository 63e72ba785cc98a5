//! skel CLI — project scaffolding from token-substituted template sets.
//!
//! Provides seven commands covering the template workflow: `new` (author a
//! set from a preset), `use` (render a set into a target directory), `save`
//! / `list` / `remove` (the local template registry), `check` (structural
//! validation), and `tokens` (inspect a set's token vocabulary).
//!
//! Template resolution goes through the
//! [`skel_core::source::TemplateSource`] chain: filesystem path, then
//! registry tag, then builtin set name.

mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "skel",
    about = "Project scaffolding from template sets with {{.Token}} substitution",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Template registry directory (default: platform data dir)
    #[arg(long, global = true, env = "SKEL_TEMPLATE_DIR")]
    template_dir: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Author a new template set from a builtin preset (tokens left intact)
    New {
        /// Name of the template set directory to create
        name: String,

        /// Builtin preset to start from
        #[arg(long, value_enum, default_value = "basic-cli")]
        preset: PresetChoice,

        /// Parent directory for the new set
        #[arg(long, short, default_value = ".")]
        output: PathBuf,
    },

    /// Render a template set into a target directory
    Use {
        /// Template spec: a path, a registry tag, or a builtin name
        template: String,

        /// Target directory for the rendered project
        target: PathBuf,

        /// Token assignment, repeatable (e.g. --set AppName=ping)
        #[arg(long = "set", value_name = "TOKEN=VALUE")]
        assignments: Vec<String>,

        /// JSON file with token values (flat string-to-string object)
        #[arg(long)]
        values: Option<PathBuf>,

        /// Seed the mapping with the manifest's prompt defaults
        #[arg(long)]
        defaults: bool,

        /// Never prompt; missing tokens become a hard error
        #[arg(long)]
        no_input: bool,

        /// Leave unmapped tokens as literal placeholder text
        #[arg(long)]
        keep_missing: bool,

        /// Render into a non-empty directory, overwriting collisions
        #[arg(long)]
        force: bool,
    },

    /// Validate and save a template set directory into the registry
    Save {
        /// Template set directory to save
        dir: PathBuf,

        /// Registry tag to save under
        tag: String,

        /// Replace an existing tag
        #[arg(long)]
        force: bool,
    },

    /// List builtin template sets and registry contents
    List,

    /// Delete a saved template set from the registry
    Remove {
        /// Registry tag to delete
        tag: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Run structural validation on a template set directory
    Check {
        /// Template set directory to check
        dir: PathBuf,

        /// Treat warnings as failures
        #[arg(long)]
        strict: bool,
    },

    /// Show a template set's token vocabulary and prompt coverage
    Tokens {
        /// Template spec: a path, a registry tag, or a builtin name
        template: String,
    },
}

#[derive(ValueEnum, Clone, Debug)]
pub enum PresetChoice {
    BasicCli,
    Library,
    WebService,
}

impl PresetChoice {
    /// The builtin template set this preset copies from.
    pub fn set_name(&self) -> &'static str {
        match self {
            Self::BasicCli => "basic_cli_template",
            Self::Library => "library_template",
            Self::WebService => "web_service_template",
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::New {
            name,
            preset,
            output,
        } => {
            commands::new::run(&name, &preset, &output).await?;
        }
        Commands::Use {
            template,
            target,
            assignments,
            values,
            defaults,
            no_input,
            keep_missing,
            force,
        } => {
            commands::use_::run(
                &template,
                &target,
                &assignments,
                values.as_deref(),
                commands::use_::UseFlags {
                    defaults,
                    no_input,
                    keep_missing,
                    force,
                },
                cli.template_dir,
            )
            .await?;
        }
        Commands::Save { dir, tag, force } => {
            commands::save::run(&dir, &tag, force, cli.template_dir).await?;
        }
        Commands::List => {
            commands::list::run(cli.template_dir).await?;
        }
        Commands::Remove { tag, yes } => {
            commands::remove::run(&tag, yes, cli.template_dir).await?;
        }
        Commands::Check { dir, strict } => {
            commands::check::run(&dir, strict).await?;
        }
        Commands::Tokens { template } => {
            commands::tokens::run(&template, cli.template_dir).await?;
        }
    }

    Ok(())
}
