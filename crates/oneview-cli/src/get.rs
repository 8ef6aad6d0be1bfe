//! # Get Subcommand
//!
//! Resolves a property path against a JSON or YAML document and prints the
//! value found there.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use oneview_core::{get_dict_property, load_document};

use crate::{EXIT_OK, EXIT_REJECTED};

/// Arguments for the `oneview get` subcommand.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// JSON or YAML document to read.
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Property path, e.g. `A.B.data[0].info`.
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Print string values without JSON quoting.
    #[arg(long)]
    pub raw: bool,
}

/// Execute the get subcommand.
///
/// Returns exit code: 0 when the path resolves, 1 when it does not.
pub fn run_get(args: &GetArgs) -> Result<u8> {
    let document = load_document(&args.document)
        .with_context(|| format!("failed to load document {}", args.document.display()))?;

    match get_dict_property(&document, &args.path) {
        Some(value) => {
            println!("{}", render_value(value, args.raw)?);
            Ok(EXIT_OK)
        }
        None => {
            tracing::info!(path = %args.path, "property not found");
            println!("not found: {}", args.path);
            Ok(EXIT_REJECTED)
        }
    }
}

/// Pretty JSON, or the bare text of a string when `raw` is set.
pub fn render_value(value: &Value, raw: bool) -> Result<String> {
    match value {
        Value::String(s) if raw => Ok(s.clone()),
        other => serde_json::to_string_pretty(other).context("failed to render value"),
    }
}
