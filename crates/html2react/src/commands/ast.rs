//! Print the parsed AST.

use std::path::Path;

use anyhow::{Context, Result};

use super::read_input;

/// Run the ast command.
pub fn run(input: Option<&Path>) -> Result<()> {
    let source = read_input(input)?;
    let nodes = html2react_parser::parse(&source).context("Failed to parse HTML")?;

    tracing::debug!("Parsed {} top-level nodes", nodes.len());

    let json = serde_json::to_string_pretty(&nodes).context("Failed to serialize AST")?;
    println!("{json}");

    Ok(())
}
