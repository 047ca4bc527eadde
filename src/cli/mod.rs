//! # Command-Line Interface
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `generate [DIR]` | Scan docs, render the TOC, inject it into the README |
//! | `preview` | Report stale TOC regions without writing |
//! | `init` | Write a default `toc.toml` |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output:
//! ```bash
//! doctoc --verbose generate docs
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod prompt;
mod toc;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
pub use prompt::confirm_cleanup;
pub use toc::{generate, render_toc, GenerateArgs};
