//! # Storage Layer
//!
//! Everything that touches the filesystem.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Config | TOML | `toc.toml` in the working directory |
//! | Docs | Markdown + optional YAML frontmatter | `base_dir` tree |
//! | Host document | Plain text lines | `out_file` (default `README.md`) |
//!
//! ## Key Types
//!
//! - [`Config`] - Resolved configuration
//! - [`HostDocument`] - Line view of the document receiving the TOC
//! - [`scan_docs`] - Markdown discovery with ignore globs and depth limit

mod config;
mod docs;
mod document;
mod meta;

pub use config::{Config, ConfigError, UserConfig, CONFIG_FILE_NAME, DEFAULT_IGNORE};
pub use docs::{link_prefix, scan_docs, ScanError, ScanOptions};
pub use document::{split_lines, HostDocument};
pub use meta::{cleanup_name, enrich_tree, extract_h1, parse_meta, read_meta, FileMeta};
