//! doctoc - keeps a generated table of contents inside a markdown document
//!
//! The TOC lives between `<!--toc-->` and `<!--tocEnd:offset=N-->` markers in
//! a host document (usually `README.md`). Each run scans the docs tree,
//! renders a fresh list and rewrites only the managed region, repairing
//! markers that were moved, duplicated or half-deleted by hand.

pub mod cli;
pub mod domain;
pub mod injector;
pub mod storage;

pub use domain::{CleanupPreview, DocumentAnalysis, StaleKind, StaleRegion};
pub use injector::{inject, InjectOptions, InjectionOutcome, InjectionReport};
