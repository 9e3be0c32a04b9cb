//! html2react CLI - convert HTML fragments into React element trees.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

use config::{load_config, Format};

#[derive(Parser)]
#[command(name = "html2react")]
#[command(about = "Convert HTML fragments into React element trees")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to html2react.toml config file
    #[arg(short, long, default_value = "html2react.toml", global = true)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        yes: bool,
    },

    /// Convert HTML files (or stdin) to JSON or JSX element trees
    Convert {
        /// Input files or directories; reads stdin when omitted or "-"
        inputs: Vec<PathBuf>,

        /// Output format (defaults to config or "json")
        #[arg(short, long, value_enum)]
        format: Option<Format>,

        /// Write one file per input into this directory, mirroring walked directories
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Reject component and tag names a renderer could not construct
        #[arg(long)]
        strict: bool,
    },

    /// Print the parsed HTML AST as JSON
    Ast {
        /// Input file; reads stdin when omitted or "-"
        input: Option<PathBuf>,
    },

    /// Show how attribute names map to React props
    Attrs {
        /// Attribute names to map; prints the whole table when omitted
        names: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout carries command output
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes)?;
        }
        Commands::Convert {
            inputs,
            format,
            output,
            strict,
        } => {
            let config = load_config(&cli.config)?;
            let options = commands::convert::Options {
                format: format.unwrap_or(config.output.format),
                pretty: config.output.pretty,
                strict,
            };
            commands::convert::run(&inputs, output.as_deref(), &config.components, &options)?;
        }
        Commands::Ast { input } => {
            commands::ast::run(input.as_deref())?;
        }
        Commands::Attrs { names } => {
            commands::attrs::run(&names);
        }
    }

    Ok(())
}
