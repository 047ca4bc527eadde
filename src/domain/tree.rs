//! Document tree built from relative file paths

use std::cmp::Ordering;

use serde::Serialize;

use super::sort_key::{compare_sort_keys, extract_sort_key};

/// File or directory payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    File {
        /// Link target relative to the host document
        link: String,
    },
    Dir {
        children: Vec<DocNode>,
    },
}

/// A node in the document tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocNode {
    /// Last path segment, including extension for files
    pub name: String,

    /// Path relative to the scan root, `/`-separated
    pub path: String,

    pub kind: NodeKind,

    /// Title shown in the rendered list; falls back to `name`
    pub display_name: Option<String>,

    /// Explicit position from frontmatter or a numeric filename prefix
    pub order: Option<i64>,
}

impl DocNode {
    pub fn file(name: &str, path: &str, link: String) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            kind: NodeKind::File { link },
            display_name: None,
            order: None,
        }
    }

    pub fn dir(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            kind: NodeKind::Dir {
                children: Vec::new(),
            },
            display_name: None,
            order: None,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Dir { .. })
    }

    pub fn children(&self) -> &[DocNode] {
        match &self.kind {
            NodeKind::Dir { children } => children,
            NodeKind::File { .. } => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<DocNode>> {
        match &mut self.kind {
            NodeKind::Dir { children } => Some(children),
            NodeKind::File { .. } => None,
        }
    }

    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

/// Builds a tree from `/`-separated relative file paths
///
/// Links are `prefix/path`, or just `path` when the prefix is `.` or empty.
/// A path repeated in the input is kept once.
pub fn build_tree_from_paths<S: AsRef<str>>(paths: &[S], link_prefix: &str) -> Vec<DocNode> {
    let mut root: Vec<DocNode> = Vec::new();

    for file_path in paths {
        let parts: Vec<&str> = file_path
            .as_ref()
            .split('/')
            .filter(|p| !p.is_empty())
            .collect();
        insert_path(&mut root, &parts, 0, link_prefix);
    }

    root
}

fn insert_path(level: &mut Vec<DocNode>, parts: &[&str], depth: usize, link_prefix: &str) {
    let Some(name) = parts.get(depth) else {
        return;
    };
    let is_file = depth == parts.len() - 1;
    let path = parts[..=depth].join("/");

    let existing = level
        .iter()
        .position(|n| n.name == *name && n.is_dir() != is_file);

    let index = match existing {
        Some(index) => index,
        None => {
            let node = if is_file {
                let link = if link_prefix.is_empty() || link_prefix == "." {
                    path.clone()
                } else {
                    format!("{}/{}", link_prefix.trim_end_matches('/'), path)
                };
                DocNode::file(name, &path, link)
            } else {
                DocNode::dir(name, &path)
            };
            level.push(node);
            level.len() - 1
        }
    };

    if let Some(children) = level[index].children_mut() {
        insert_path(children, parts, depth + 1, link_prefix);
    }
}

/// Sorts every level of the tree in place
///
/// Explicit order first (missing last), then the name's sort key, then
/// directories before files, then a natural comparison of display names.
pub fn sort_tree(nodes: &mut [DocNode]) {
    nodes.sort_by(compare_nodes);

    for node in nodes.iter_mut() {
        if let Some(children) = node.children_mut() {
            sort_tree(children);
        }
    }
}

fn compare_nodes(a: &DocNode, b: &DocNode) -> Ordering {
    let order_a = a.order.unwrap_or(i64::MAX);
    let order_b = b.order.unwrap_or(i64::MAX);

    order_a
        .cmp(&order_b)
        .then_with(|| {
            let key_a = extract_sort_key(&a.name);
            let key_b = extract_sort_key(&b.name);
            compare_sort_keys(key_a.as_deref(), key_b.as_deref())
        })
        .then_with(|| b.is_dir().cmp(&a.is_dir()))
        .then_with(|| natural_cmp(a.display_name(), b.display_name()))
}

/// Case-insensitive comparison treating digit runs as numbers (`2` < `10`)
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut a = a.chars().peekable();
    let mut b = b.chars().peekable();

    loop {
        match (a.peek().copied(), b.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let run_a = take_digits(&mut a);
                let run_b = take_digits(&mut b);
                let ord = compare_digit_runs(&run_a, &run_b);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(x), Some(y)) => {
                let ord = x.to_lowercase().cmp(y.to_lowercase());
                if ord != Ordering::Equal {
                    return ord;
                }
                a.next();
                b.next();
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        run.push(c);
    }
    run
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(nodes: &[DocNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn builds_nested_tree() {
        let tree = build_tree_from_paths(
            &["guide/intro.md", "guide/setup.md", "faq.md", "guide/advanced/tips.md"],
            "docs",
        );

        assert_eq!(names(&tree), vec!["guide", "faq.md"]);
        let guide = &tree[0];
        assert!(guide.is_dir());
        assert_eq!(names(guide.children()), vec!["intro.md", "setup.md", "advanced"]);

        let tips = &guide.children()[2].children()[0];
        assert_eq!(tips.path, "guide/advanced/tips.md");
        assert_eq!(
            tips.kind,
            NodeKind::File {
                link: "docs/guide/advanced/tips.md".to_string()
            }
        );
    }

    #[test]
    fn dot_prefix_keeps_plain_links() {
        let tree = build_tree_from_paths(&["a.md"], ".");
        assert_eq!(
            tree[0].kind,
            NodeKind::File {
                link: "a.md".to_string()
            }
        );
    }

    #[test]
    fn duplicate_paths_kept_once() {
        let tree = build_tree_from_paths(&["a/b.md", "a/b.md"], "");
        assert_eq!(tree[0].children().len(), 1);
    }

    #[test]
    fn sort_by_order_then_key_then_dirs() {
        let mut nodes = vec![
            DocNode::file("zeta.md", "zeta.md", "zeta.md".into()),
            DocNode::dir("alpha", "alpha"),
            DocNode::file("2_two.md", "2_two.md", "2_two.md".into()),
            DocNode::file("10_ten.md", "10_ten.md", "10_ten.md".into()),
            DocNode::file("beta.md", "beta.md", "beta.md".into()),
        ];
        nodes[4].order = Some(1);

        sort_tree(&mut nodes);

        assert_eq!(
            names(&nodes),
            vec!["beta.md", "2_two.md", "10_ten.md", "alpha", "zeta.md"]
        );
    }

    #[test]
    fn sort_recurses_into_children() {
        let mut tree = build_tree_from_paths(&["d/b.md", "d/a.md"], "");
        sort_tree(&mut tree);
        assert_eq!(names(tree[0].children()), vec!["a.md", "b.md"]);
    }

    #[test]
    fn natural_ordering() {
        assert_eq!(natural_cmp("file2", "file10"), Ordering::Less);
        assert_eq!(natural_cmp("Apple", "banana"), Ordering::Less);
        assert_eq!(natural_cmp("abc", "ABC"), Ordering::Equal);
        assert_eq!(natural_cmp("a", "ab"), Ordering::Less);
        assert_eq!(natural_cmp("v007", "v7"), Ordering::Equal);
    }
}
