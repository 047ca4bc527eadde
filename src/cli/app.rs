//! Main CLI application structure

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::toc::{self, GenerateArgs};
use crate::storage::{Config, CONFIG_FILE_NAME};

#[derive(Parser)]
#[command(name = "doctoc")]
#[command(author, version, about = "Keeps a table of contents for a docs tree inside your README")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the table of contents and write it into the README
    Generate {
        /// Directory to scan (defaults to `base_dir` from toc.toml, then "docs")
        dir: Option<String>,

        /// Maximum directory depth
        #[arg(long, short = 'd')]
        depth: Option<usize>,

        /// Document receiving the table of contents
        #[arg(long, short = 'o', env = "DOCTOC_OUT")]
        out: Option<String>,

        /// Remove stale TOC regions without asking
        #[arg(long, short = 'y')]
        yes: bool,

        /// Show what would change without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Show stale TOC regions in the README without changing it
    Preview {
        /// Document to inspect
        #[arg(long, short = 'o', env = "DOCTOC_OUT")]
        out: Option<String>,
    },

    /// Write a default toc.toml in the current directory
    Init,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("doctoc starting");

    match cli.command {
        Commands::Generate {
            dir,
            depth,
            out,
            yes,
            dry_run,
        } => {
            let args = GenerateArgs {
                dir,
                out,
                depth,
                yes,
                dry_run,
            };
            output.verbose_ctx("generate", &format!("{:?}", args));
            toc::generate(&output, &args)?
        }

        Commands::Preview { out } => toc::preview(&output, out.as_deref())?,

        Commands::Init => {
            let cwd = std::env::current_dir().context("Failed to determine current directory")?;
            if Config::write_default(&cwd)? {
                output.message(&format!("Created {}", CONFIG_FILE_NAME));
            } else {
                output.message(&format!("{} already exists", CONFIG_FILE_NAME));
            }
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}
