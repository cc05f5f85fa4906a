//! Rendering cakes for the terminal.
//!
//! A [`Document`] renders back to INI, or serializes to JSON or TOML for
//! other tools to consume.

use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::Colorize;
use layercake::constants::DEFAULT_SECTION;
use layercake::{Document, Section};

/// Output format for `cake show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Ini,
    Json,
    Toml,
}

/// Renders the whole document in `format`.
pub fn render(doc: &Document, format: Format) -> Result<String> {
    match format {
        Format::Ini => Ok(render_ini(doc)),
        Format::Json => {
            let mut json =
                serde_json::to_string_pretty(doc).context("Failed to serialize cake as JSON")?;
            json.push('\n');
            Ok(json)
        }
        Format::Toml => toml::to_string_pretty(doc).context("Failed to serialize cake as TOML"),
    }
}

/// Renders a single section's own keys in `format`.
pub fn render_section(doc: &Document, name: &str, format: Format) -> Result<String> {
    let section = doc
        .section(name)
        .ok_or_else(|| anyhow::anyhow!("No section `{}` in cake", name))?;
    match format {
        Format::Ini => {
            let mut out = String::new();
            write_section(&mut out, name, section);
            Ok(out)
        }
        Format::Json => {
            let mut json = serde_json::to_string_pretty(section)
                .context("Failed to serialize section as JSON")?;
            json.push('\n');
            Ok(json)
        }
        Format::Toml => toml::to_string_pretty(section).context("Failed to serialize section as TOML"),
    }
}

/// Renders `doc` as INI text, default section first.
pub fn render_ini(doc: &Document) -> String {
    let mut out = String::new();
    if !doc.defaults().is_empty() {
        write_section(&mut out, DEFAULT_SECTION, doc.defaults());
    }
    for name in doc.sections() {
        if let Some(section) = doc.section(name) {
            write_section(&mut out, name, section);
        }
    }
    out
}

fn write_section(out: &mut String, name: &str, section: &Section) {
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(&format!("[{}]\n", name));
    for (key, value) in section {
        // Continuation lines are indented so the output parses back.
        let value = value.replace('\n', "\n\t");
        out.push_str(&format!("{} = {}\n", key, value));
    }
}

/// Prints an error chain to stderr.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "error:".red().bold(), err);
    for cause in err.chain().skip(1) {
        eprintln!("  {} {}", "caused by:".dimmed(), cause);
    }
}
