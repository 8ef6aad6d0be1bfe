//! # oneview-cli: Command-Line Access to the Request Toolkit
//!
//! Provides the `oneview` binary for inspecting request documents offline,
//! before anything is sent to an appliance.
//!
//! ## Subcommands
//!
//! - `oneview get`: Resolve a property path in a JSON/YAML document.
//! - `oneview check`: Check a document against required-field paths,
//!   either listed on the command line or taken from a guard table.
//!
//! ```bash
//! oneview get body.json 'A.B.data[0].info'
//! oneview check body.yaml --require source.name --require id
//! oneview check body.yaml --table guards.yaml --operation backups.create
//! ```
//!
//! ## Exit Codes
//!
//! - `0`: value found / document accepted.
//! - `1`: value absent / document rejected.
//! - `2`: operational error (unreadable document, bad guard table).
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to `oneview-core` and only format output.

pub mod check;
pub mod get;

/// Exit code for a found value or an accepted document.
pub const EXIT_OK: u8 = 0;
/// Exit code for an absent value or a rejected document.
pub const EXIT_REJECTED: u8 = 1;
/// Exit code for operational errors.
pub const EXIT_ERROR: u8 = 2;
