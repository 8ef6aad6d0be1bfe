//! # Check Subcommand
//!
//! Checks a request document against a required-fields guard before it is
//! handed to a resource client.
//!
//! The guard comes either from repeated `--require PATH` flags or from a
//! guard table entry (`--table FILE --operation NAME`). The table path may
//! also be supplied through `ONEVIEW_GUARD_TABLE`.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use oneview_core::{load_document, GuardTable, RequiredFields};

use crate::{EXIT_OK, EXIT_REJECTED};

/// Arguments for the `oneview check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// JSON or YAML document to check.
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Required property path. Repeat for several paths.
    #[arg(long = "require", value_name = "PATH", conflicts_with = "operation")]
    pub require: Vec<String>,

    /// Guard table (JSON or YAML) to look the operation up in.
    #[arg(long, value_name = "TABLE", env = "ONEVIEW_GUARD_TABLE")]
    pub table: Option<PathBuf>,

    /// Operation name in the guard table, e.g. `backups.create`.
    #[arg(long, value_name = "NAME")]
    pub operation: Option<String>,
}

/// Execute the check subcommand.
///
/// Returns exit code: 0 if the document satisfies the guard, 1 if it does not.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    let (label, guard) = select_guard(args)?;

    let document = load_document(&args.document)
        .with_context(|| format!("failed to load document {}", args.document.display()))?;

    match guard.check(Some(&document)) {
        Ok(()) => {
            println!(
                "OK: {} satisfies {} ({} required field(s))",
                args.document.display(),
                label,
                guard.paths().len()
            );
            Ok(EXIT_OK)
        }
        Err(e) => {
            tracing::debug!(kind = ?e.kind(), "document rejected");
            println!("FAIL: {}: {}", args.document.display(), e);
            Ok(EXIT_REJECTED)
        }
    }
}

/// Build the guard named by the arguments, with a label for output.
fn select_guard(args: &CheckArgs) -> Result<(String, RequiredFields)> {
    if !args.require.is_empty() {
        let guard = RequiredFields::new(args.require.iter().cloned())
            .context("invalid --require list")?;
        return Ok(("--require".to_string(), guard));
    }

    let Some(operation) = &args.operation else {
        bail!("nothing to check: pass --require PATH or --operation NAME");
    };
    let Some(table_path) = &args.table else {
        bail!("--operation needs a guard table: pass --table or set ONEVIEW_GUARD_TABLE");
    };

    let table = GuardTable::from_path(table_path)
        .with_context(|| format!("failed to load guard table {}", table_path.display()))?;
    let Some(guard) = table.get(operation) else {
        bail!(
            "operation '{operation}' is not declared in {}; known operations: {}",
            table_path.display(),
            table.operations().join(", ")
        );
    };
    Ok((format!("operation '{operation}'"), guard.clone()))
}
