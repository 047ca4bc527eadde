//! Markdown list rendering for a sorted document tree

use super::tree::{DocNode, NodeKind};

/// Renders the tree as a nested bullet list, two spaces per level
pub fn render_markdown(nodes: &[DocNode]) -> String {
    let mut out = String::new();
    render_level(nodes, 0, &mut out);
    out
}

fn render_level(nodes: &[DocNode], depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);

    for node in nodes {
        match &node.kind {
            NodeKind::File { link } => {
                out.push_str(&format!(
                    "{}- [{}]({})\n",
                    indent,
                    node.display_name(),
                    encode_link(link)
                ));
            }
            NodeKind::Dir { children } => {
                out.push_str(&format!("{}- {}\n", indent, node.display_name()));
                render_level(children, depth + 1, out);
            }
        }
    }
}

/// Percent-encodes each path segment, keeping `/` and relative segments
pub fn encode_link(link: &str) -> String {
    link.split('/')
        .map(|segment| match segment {
            "." | ".." => segment.to_string(),
            _ => urlencoding::encode(segment).into_owned(),
        })
        .collect::<Vec<_>>()
        .join("/")
}
