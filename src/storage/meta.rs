//! Title and order extraction from markdown files
//!
//! Title priority: frontmatter `title`, then the first `# H1` outside code
//! fences, then the filename without extension and numeric prefix.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::domain::{is_fence, DocNode, NodeKind};

static H1_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*#\s+(.*)").expect("valid h1 regex"));

static ORDER_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)[-_]").expect("valid order prefix regex"));

/// Frontmatter keys doctoc cares about; everything else is ignored
#[derive(Debug, Default, Deserialize)]
struct Frontmatter {
    title: Option<String>,
    order: Option<i64>,
}

/// Metadata read from one markdown file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMeta {
    pub title: Option<String>,
    pub order: Option<i64>,
}

/// Splits YAML frontmatter from the body, if the file starts with `---`
fn split_frontmatter(content: &str) -> (Option<&str>, &str) {
    let trimmed = content.trim_start_matches('\u{feff}');
    let Some(rest) = trimmed
        .strip_prefix("---\n")
        .or_else(|| trimmed.strip_prefix("---\r\n"))
    else {
        return (None, content);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return (Some(&rest[..offset]), &rest[offset + line.len()..]);
        }
        offset += line.len();
    }

    (None, content)
}

/// First level-one heading outside fenced code blocks
pub fn extract_h1(body: &str) -> Option<String> {
    let mut in_fence = false;

    for line in body.lines() {
        if is_fence(line) {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if let Some(caps) = H1_RE.captures(line) {
            let title = caps[1].trim();
            if !title.is_empty() {
                return Some(title.to_string());
            }
        }
    }

    None
}

/// Parses title and order from file contents
pub fn parse_meta(content: &str) -> FileMeta {
    let (yaml, body) = split_frontmatter(content);

    let frontmatter: Frontmatter = yaml
        .and_then(|y| serde_yaml::from_str(y).ok())
        .unwrap_or_default();

    let title = frontmatter
        .title
        .filter(|t| !t.trim().is_empty())
        .or_else(|| extract_h1(body));

    FileMeta {
        title,
        order: frontmatter.order,
    }
}

/// Reads and parses a markdown file's metadata
pub fn read_meta(path: &Path) -> Result<FileMeta> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read markdown file: {}", path.display()))?;
    Ok(parse_meta(&content))
}

/// Display name from a filename: drops `.md` and a `01_`/`01-` prefix
pub fn cleanup_name(name: &str) -> String {
    let stem = name
        .strip_suffix(".md")
        .or_else(|| name.strip_suffix(".MD"))
        .unwrap_or(name);
    ORDER_PREFIX_RE.replace(stem, "").into_owned()
}

fn order_from_prefix(name: &str) -> Option<i64> {
    ORDER_PREFIX_RE
        .captures(name)
        .and_then(|caps| caps[1].parse().ok())
}

/// Fills display names and order for every node under `root`
///
/// Files that cannot be read keep filename-derived names; their paths are
/// returned so the caller can report them.
pub fn enrich_tree(nodes: &mut [DocNode], root: &Path) -> Vec<String> {
    let mut failures = Vec::new();
    enrich_level(nodes, root, &mut failures);
    failures
}

fn enrich_level(nodes: &mut [DocNode], root: &Path, failures: &mut Vec<String>) {
    for node in nodes.iter_mut() {
        match &mut node.kind {
            NodeKind::File { .. } => {
                let meta = match read_meta(&root.join(&node.path)) {
                    Ok(meta) => meta,
                    Err(_) => {
                        failures.push(node.path.clone());
                        FileMeta::default()
                    }
                };

                node.display_name = Some(meta.title.unwrap_or_else(|| cleanup_name(&node.name)));
                node.order = meta.order.or_else(|| order_from_prefix(&node.name));
            }
            NodeKind::Dir { children } => {
                enrich_level(children, root, failures);
                node.display_name = Some(cleanup_name(&node.name));
            }
        }
    }
}
