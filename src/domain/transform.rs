//! Document rewriting
//!
//! Produces the new line sequence for an analyzed document: the active region
//! is replaced with fresh content, stale regions are dropped, and every other
//! line is kept verbatim and in order.

use serde::Serialize;

use super::analysis::{DocumentAnalysis, StaleRegion};
use super::tags::{end_tag, START_TAG};

/// What a rewrite would remove, shown to the user before anything is written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanupPreview {
    pub needs_cleanup: bool,
    pub regions: Vec<StaleRegion>,
    pub summary: String,
}

/// Describes the stale regions of an analysis without changing anything
pub fn build_cleanup_preview(analysis: &DocumentAnalysis) -> CleanupPreview {
    let regions = analysis.stale_regions.clone();

    let summary = if regions.is_empty() {
        "No stale TOC regions found.".to_string()
    } else {
        let mut summary = format!("Found {} stale TOC region(s) to remove:", regions.len());
        for region in &regions {
            summary.push_str(&format!(
                "\n  - line {}-{}: {}",
                region.start_line + 1,
                region.end_line + 1,
                region.kind
            ));
        }
        summary
    };

    CleanupPreview {
        needs_cleanup: analysis.has_stale_regions(),
        regions,
        summary,
    }
}

/// Rewrites the document with `content` injected at the active mark
///
/// Without an active mark only stale regions are removed; appending a fresh
/// marker pair is left to the caller (see [`append_section`]).
pub fn transform_document(analysis: &DocumentAnalysis, content: &str) -> Vec<String> {
    let is_stale = |line: usize| analysis.stale_regions.iter().any(|r| r.contains(line));

    let active = analysis.active_mark();
    let lines = &analysis.lines;
    let mut out = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        if active.is_some_and(|m| m.line_index == i) {
            out.push(lines[i].clone());
            push_content(&mut out, content);

            i = match analysis.active_end() {
                Some(end) => end.line_index + 1,
                None => i + 1,
            };
            continue;
        }

        if !is_stale(i) {
            out.push(lines[i].clone());
        }
        i += 1;
    }

    collapse_blank_lines(out)
}

/// Appends a heading and a fresh marker pair wrapping `content`
pub fn append_section(mut lines: Vec<String>, heading: &str, content: &str) -> Vec<String> {
    if lines.last().is_some_and(|l| !l.trim().is_empty()) {
        lines.push(String::new());
    }

    if !heading.trim().is_empty() {
        lines.push(heading.to_string());
    }
    lines.push(START_TAG.to_string());
    push_content(&mut lines, content);

    collapse_blank_lines(lines)
}

/// Pushes content lines followed by an end tag recording their count
fn push_content(out: &mut Vec<String>, content: &str) {
    let before = out.len();
    out.extend(content.lines().map(str::to_string));
    let count = out.len() - before;
    out.push(end_tag(count));
}

/// Collapses runs of three or more blank lines down to two
pub fn collapse_blank_lines(lines: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut blanks = 0;

    for line in lines {
        if line.trim().is_empty() {
            blanks += 1;
            if blanks > 2 {
                continue;
            }
        } else {
            blanks = 0;
        }
        out.push(line);
    }

    out
}
