//! Document analysis
//!
//! Pairs marks with ends, picks the active mark and finds stale regions left
//! behind by manual edits (moved, deleted or copy-pasted markers).
//!
//! ## Active mark
//!
//! | Marks | Active |
//! |-------|--------|
//! | none | none |
//! | one | that mark |
//! | several, some bare | the last bare mark |
//! | several, all paired | the first mark |
//!
//! ## Stale regions
//!
//! - An end with no mark: `[end - offset, end]`
//! - A paired mark that is not active: `[mark, end]`
//! - The active region holding more lines than its end recorded:
//!   `[end - offset, end]`

use std::fmt;

use serde::Serialize;

use super::tags::{EndTag, MarkTag, ScannedTags};

/// Why a line range is considered stale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StaleKind {
    /// End tag whose start marker was deleted or moved below it
    OrphanEnd,
    /// Complete mark/end block that is not the active one
    Complete,
    /// Old content left at the tail of the active region after the mark moved up
    MovedContent,
}

impl StaleKind {
    /// Human-readable label used in cleanup summaries
    pub fn label(&self) -> &'static str {
        match self {
            StaleKind::OrphanEnd => "orphan end tag",
            StaleKind::Complete => "duplicate TOC block",
            StaleKind::MovedContent => "moved TOC content",
        }
    }
}

impl fmt::Display for StaleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive range of lines to discard on the next write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StaleRegion {
    pub kind: StaleKind,
    pub start_line: usize,
    pub end_line: usize,
}

impl StaleRegion {
    pub fn contains(&self, line: usize) -> bool {
        (self.start_line..=self.end_line).contains(&line)
    }
}

/// Everything derived from one read of the host document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentAnalysis {
    pub lines: Vec<String>,
    pub marks: Vec<MarkTag>,
    pub ends: Vec<EndTag>,

    /// Index into `marks` of the mark the next injection targets
    pub active: Option<usize>,

    /// Sorted by `start_line` descending
    pub stale_regions: Vec<StaleRegion>,

    pub move_detected: bool,
}

impl DocumentAnalysis {
    pub fn active_mark(&self) -> Option<&MarkTag> {
        self.active.map(|i| &self.marks[i])
    }

    /// The end tag paired with the active mark, if any
    pub fn active_end(&self) -> Option<&EndTag> {
        let end_line = self.active_mark()?.paired_end?;
        self.ends.iter().find(|e| e.line_index == end_line)
    }

    pub fn has_stale_regions(&self) -> bool {
        !self.stale_regions.is_empty()
    }
}

/// Pairs each mark with the earliest unpaired end strictly below it
fn pair_tags(marks: &mut [MarkTag], ends: &mut [EndTag]) {
    for mark in marks.iter_mut() {
        let end = ends
            .iter_mut()
            .find(|e| e.line_index > mark.line_index && e.paired_mark.is_none());

        if let Some(end) = end {
            mark.paired_end = Some(end.line_index);
            end.paired_mark = Some(mark.line_index);
        }
    }
}

/// Selects the active mark; marks are in document order
fn select_active(marks: &[MarkTag]) -> Option<usize> {
    match marks.len() {
        0 => None,
        1 => Some(0),
        _ => marks.iter().rposition(MarkTag::is_bare).or(Some(0)),
    }
}

/// Analyzes scanned tags against the document lines
pub fn analyze_document(lines: Vec<String>, tags: ScannedTags) -> DocumentAnalysis {
    let ScannedTags {
        mut marks,
        mut ends,
    } = tags;

    pair_tags(&mut marks, &mut ends);
    let active = select_active(&marks);

    let mut stale_regions = Vec::new();
    let mut move_detected = false;

    for end in ends.iter().filter(|e| e.is_bare()) {
        stale_regions.push(StaleRegion {
            kind: StaleKind::OrphanEnd,
            start_line: end.line_index.saturating_sub(end.offset),
            end_line: end.line_index,
        });
        move_detected = true;
    }

    for (i, mark) in marks.iter().enumerate() {
        if Some(i) == active {
            continue;
        }
        if let Some(end_line) = mark.paired_end {
            stale_regions.push(StaleRegion {
                kind: StaleKind::Complete,
                start_line: mark.line_index,
                end_line,
            });
        }
    }

    if let Some(mark) = active.map(|i| &marks[i]) {
        let end = mark
            .paired_end
            .and_then(|line| ends.iter().find(|e| e.line_index == line));

        if let Some(end) = end.filter(|e| e.offset > 0) {
            let actual_distance = end.line_index - mark.line_index - 1;
            if actual_distance > end.offset {
                stale_regions.push(StaleRegion {
                    kind: StaleKind::MovedContent,
                    start_line: end.line_index - end.offset,
                    end_line: end.line_index,
                });
                move_detected = true;
            }
        }
    }

    stale_regions.sort_by(|a, b| {
        b.start_line
            .cmp(&a.start_line)
            .then(b.end_line.cmp(&a.end_line))
    });

    DocumentAnalysis {
        lines,
        marks,
        ends,
        active,
        stale_regions,
        move_detected,
    }
}
