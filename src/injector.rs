//! Injection of rendered content into the host document
//!
//! Sequences scan → analyze → (confirm) → transform → write. The document is
//! the only durable state: everything is re-derived from its text each run.
//!
//! Cleanup of stale regions needs the caller's consent. The confirmation gate
//! is a closure receiving the [`CleanupPreview`]; declining aborts the whole
//! run and nothing is written.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use crate::domain::{
    analyze_document, append_section, build_cleanup_preview, scan_tags, transform_document,
    CleanupPreview, DocumentAnalysis, StaleRegion,
};
use crate::storage::HostDocument;

/// How an injection ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InjectionOutcome {
    /// Content replaced at the active mark
    Updated,
    /// No start marker existed; a fresh section was appended
    Appended,
    /// The document already held exactly this content
    Unchanged,
    /// Stale regions were found and the caller refused the cleanup
    CleanupDeclined,
}

impl InjectionOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, InjectionOutcome::CleanupDeclined)
    }
}

/// Structured result of an injection
#[derive(Debug, Clone, Serialize)]
pub struct InjectionReport {
    pub success: bool,
    pub outcome: InjectionOutcome,
    pub message: String,
    pub path: PathBuf,
    pub removed_regions: Vec<StaleRegion>,
    pub move_detected: bool,
    pub dry_run: bool,
}

/// Options for a single injection
#[derive(Debug, Clone, Default)]
pub struct InjectOptions<'a> {
    /// Heading written above a freshly appended section (may be empty)
    pub heading: &'a str,

    /// Compute everything but never write or ask
    pub dry_run: bool,
}

/// The rewrite computed for a document, before anything is written
#[derive(Debug, Clone)]
pub struct InjectionPlan {
    pub document: HostDocument,
    pub analysis: DocumentAnalysis,
    pub preview: CleanupPreview,
    pub new_lines: Vec<String>,

    /// True when no active mark existed and a section was appended
    pub appended: bool,
}

impl InjectionPlan {
    pub fn changes_document(&self) -> bool {
        self.document.differs(&self.new_lines)
    }
}

/// Analyzes lines already in memory
pub fn analyze_lines(lines: Vec<String>) -> DocumentAnalysis {
    let tags = scan_tags(&lines);
    analyze_document(lines, tags)
}

/// Reads the document and computes its rewrite without writing it
pub fn plan(path: &Path, content: &str, heading: &str) -> Result<InjectionPlan> {
    let document = HostDocument::read(path)?;
    let analysis = analyze_lines(document.lines.clone());
    let preview = build_cleanup_preview(&analysis);

    let transformed = transform_document(&analysis, content);
    let appended = analysis.active_mark().is_none();
    let new_lines = if appended {
        append_section(transformed, heading, content)
    } else {
        transformed
    };

    Ok(InjectionPlan {
        document,
        analysis,
        preview,
        new_lines,
        appended,
    })
}

/// Reads the document and reports its stale regions without changing it
pub fn preview(path: &Path) -> Result<CleanupPreview> {
    let document = HostDocument::read(path)?;
    let analysis = analyze_lines(document.lines);
    Ok(build_cleanup_preview(&analysis))
}

/// Injects `content` into the document at `path`
///
/// `confirm` is only called when stale regions must be removed.
pub fn inject<F>(
    path: &Path,
    content: &str,
    options: &InjectOptions<'_>,
    confirm: F,
) -> Result<InjectionReport>
where
    F: FnOnce(&CleanupPreview) -> Result<bool>,
{
    let plan = plan(path, content, options.heading)?;
    let move_detected = plan.analysis.move_detected;

    let report = |outcome: InjectionOutcome, message: String, removed: Vec<StaleRegion>| {
        InjectionReport {
            success: outcome.is_success(),
            outcome,
            message,
            path: path.to_path_buf(),
            removed_regions: removed,
            move_detected,
            dry_run: options.dry_run,
        }
    };

    if plan.preview.needs_cleanup && !options.dry_run && !confirm(&plan.preview)? {
        return Ok(report(
            InjectionOutcome::CleanupDeclined,
            "Cleanup declined; document left unchanged".to_string(),
            vec![],
        ));
    }

    let removed = plan.preview.regions.clone();

    if !plan.changes_document() {
        return Ok(report(
            InjectionOutcome::Unchanged,
            format!("{} is already up to date", path.display()),
            removed,
        ));
    }

    if !options.dry_run {
        plan.document.write(&plan.new_lines)?;
    }

    let (outcome, message) = if plan.appended {
        (
            InjectionOutcome::Appended,
            format!("Appended table of contents to {}", path.display()),
        )
    } else {
        (
            InjectionOutcome::Updated,
            format!("Updated table of contents in {}", path.display()),
        )
    };

    Ok(report(outcome, message, removed))
}
