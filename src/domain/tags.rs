//! Marker tag scanning
//!
//! A managed region is opened by `<!--toc-->` and closed by
//! `<!--tocEnd:offset=N-->`, each on its own line. The offset records how many
//! content lines the region held when it was last written, so a later run can
//! find old content even after the start marker was moved or deleted.
//!
//! Lines inside fenced code blocks (``` or ~~~) are never treated as markers.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// `<!--toc-->`, `<!-- TOC -->`, ... alone on a line
static MARK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*<!--\s*toc\s*-->\s*$").expect("valid mark regex"));

/// `<!--tocEnd-->` or `<!--tocEnd:offset=N-->` alone on a line
static END_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*<!--\s*tocend(?::\s*offset\s*=\s*(\S*?))?\s*-->\s*$")
        .expect("valid end regex")
});

/// Opening of a fenced code block, or its closing delimiter
static FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(`{3,}|~{3,})").expect("valid fence regex"));

/// Canonical start marker written into documents
pub const START_TAG: &str = "<!--toc-->";

/// One occurrence of the start marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkTag {
    /// 0-based line index
    pub line_index: usize,

    /// The trimmed line text as found in the document
    pub raw_text: String,

    /// Line index of the end tag this mark was paired with
    pub paired_end: Option<usize>,
}

impl MarkTag {
    pub fn is_bare(&self) -> bool {
        self.paired_end.is_none()
    }
}

/// One occurrence of the end marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndTag {
    /// 0-based line index
    pub line_index: usize,

    /// Content line count recorded in the tag (0 if absent or unparsable)
    pub offset: usize,

    /// Line index of the mark this end was paired with
    pub paired_mark: Option<usize>,
}

impl EndTag {
    pub fn is_bare(&self) -> bool {
        self.paired_mark.is_none()
    }
}

/// Result of scanning a document for marker tags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedTags {
    pub marks: Vec<MarkTag>,
    pub ends: Vec<EndTag>,
}

impl ScannedTags {
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty() && self.ends.is_empty()
    }
}

/// Builds the end tag line recording `offset` content lines
pub fn end_tag(offset: usize) -> String {
    format!("<!--tocEnd:offset={}-->", offset)
}

/// Returns true if the line opens or closes a fenced code block
pub fn is_fence(line: &str) -> bool {
    FENCE_RE.is_match(line)
}

/// Returns true if the line is a start marker
pub fn is_mark(line: &str) -> bool {
    MARK_RE.is_match(line)
}

/// Parses an end marker line, returning its offset
pub fn parse_end(line: &str) -> Option<usize> {
    let caps = END_RE.captures(line)?;
    let offset = caps
        .get(1)
        .and_then(|m| m.as_str().parse::<usize>().ok())
        .unwrap_or(0);
    Some(offset)
}

/// Scans document lines for start and end markers, in document order
pub fn scan_tags<S: AsRef<str>>(lines: &[S]) -> ScannedTags {
    let mut tags = ScannedTags::default();
    let mut in_fence = false;

    for (i, line) in lines.iter().enumerate() {
        let line = line.as_ref();

        if is_fence(line) {
            in_fence = !in_fence;
            continue;
        }

        if in_fence {
            continue;
        }

        if is_mark(line) {
            tags.marks.push(MarkTag {
                line_index: i,
                raw_text: line.trim().to_string(),
                paired_end: None,
            });
            continue;
        }

        if let Some(offset) = parse_end(line) {
            tags.ends.push(EndTag {
                line_index: i,
                offset,
                paired_mark: None,
            });
        }
    }

    tags
}
