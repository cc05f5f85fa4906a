//! Command-line interface definition and dispatch for `cake`.
//!
//! Uses [`clap`] for argument parsing with derive macros. Every subcommand
//! reads a manifest through the library and prints to stdout.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use layercake::{load_cake, Manifest};

use crate::output::{self, Format};

/// Top-level CLI structure for `cake`.
#[derive(Parser)]
#[command(name = "cake", about = "Inspect layered INI configuration cakes")]
pub struct Cli {
    /// Log debug details of every layer and override
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for the `cake` CLI.
///
/// The `///` doc comments on variants double as `--help` text.
#[derive(Subcommand)]
pub enum Commands {
    /// Print the merged configuration of a cake
    Show {
        /// Path to the manifest file
        manifest: PathBuf,
        /// Name of the cake to load
        cake: String,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Ini)]
        format: Format,
        /// Only print this section
        #[arg(short, long)]
        section: Option<String>,
    },
    /// Print one value of a cake, falling back to the default section
    Get {
        manifest: PathBuf,
        cake: String,
        section: String,
        key: String,
    },
    /// List the cakes a manifest declares
    List { manifest: PathBuf },
    /// Print the resolved layer files of a cake, in load order
    Layers { manifest: PathBuf, cake: String },
}

/// Parses command-line arguments into a [`Cli`] struct.
///
/// Delegates to [`clap::Parser::parse`], which exits the process on invalid input.
pub fn parse() -> Cli {
    Cli::parse()
}

/// Installs the tracing subscriber, writing to stderr.
///
/// `RUST_LOG` wins over the `--verbose`/`--quiet` flags.
pub fn init_tracing(cli: &Cli) {
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Dispatches the parsed CLI command to its handler.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Show {
            manifest,
            cake,
            format,
            section,
        } => {
            let doc = load_cake(&manifest, &cake)
                .with_context(|| format!("Failed to load cake `{}` from {:?}", cake, manifest))?;
            let rendered = match section {
                Some(name) => output::render_section(&doc, &name, format)?,
                None => output::render(&doc, format)?,
            };
            print!("{}", rendered);
            Ok(())
        }
        Commands::Get {
            manifest,
            cake,
            section,
            key,
        } => {
            let doc = load_cake(&manifest, &cake)
                .with_context(|| format!("Failed to load cake `{}` from {:?}", cake, manifest))?;
            let value = doc
                .get_interpolated(&section, &key)?
                .ok_or_else(|| anyhow::anyhow!("No key `{}` in section `{}`", key, section))?;
            println!("{}", value);
            Ok(())
        }
        Commands::List { manifest } => {
            let manifest = Manifest::load(&manifest)
                .with_context(|| format!("Failed to read manifest {:?}", manifest))?;
            for name in manifest.cake_names() {
                println!("{}", name);
            }
            Ok(())
        }
        Commands::Layers { manifest, cake } => {
            let manifest = Manifest::load(&manifest)
                .with_context(|| format!("Failed to read manifest {:?}", manifest))?;
            let resolved = manifest.resolve(&cake)?;
            for layer in &resolved.layers {
                println!("{}", layer.display());
            }
            Ok(())
        }
    }
}
