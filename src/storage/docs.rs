//! Markdown discovery under the scan root

use std::path::{Component, Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Scan directory does not exist: {0}")]
    MissingRoot(PathBuf),

    #[error("Invalid ignore pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("No Markdown files found in {0}")]
    NoMarkdownFiles(PathBuf),

    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Options for a documentation scan
#[derive(Debug, Clone)]
pub struct ScanOptions<'a> {
    pub ignore: &'a [String],

    /// Files directly under the root are at depth 1
    pub max_depth: usize,

    /// File to leave out even if it lives under the root (the host document)
    pub exclude: Option<&'a Path>,
}

fn build_ignore_set(patterns: &[String]) -> Result<GlobSet, ScanError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| ScanError::InvalidPattern {
            pattern: pattern.clone(),
            message: e.to_string(),
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| ScanError::InvalidPattern {
        pattern: patterns.join(", "),
        message: e.to_string(),
    })
}

fn to_relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Lists markdown files under `root` as sorted `/`-separated relative paths
pub fn scan_docs(root: &Path, options: &ScanOptions<'_>) -> Result<Vec<String>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::MissingRoot(root.to_path_buf()));
    }

    let ignore = build_ignore_set(options.ignore)?;
    let exclude = options.exclude.map(normalize_path);
    let mut paths = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(options.max_depth.max(1))
        .follow_links(false)
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if !path.extension().is_some_and(|e| e.eq_ignore_ascii_case("md")) {
            continue;
        }

        if exclude.as_deref() == Some(normalize_path(path).as_path()) {
            continue;
        }

        let relative = to_relative_path(root, path);
        if ignore.is_match(&relative) {
            continue;
        }

        paths.push(relative);
    }

    if paths.is_empty() {
        return Err(ScanError::NoMarkdownFiles(root.to_path_buf()));
    }

    paths.sort();
    Ok(paths)
}

/// Lexically resolves `.` and `..` components
fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Link prefix from the host document's directory to the scan root
///
/// `README.md` + `docs` → `docs`; `a/README.md` + `b/docs` → `../b/docs`;
/// `.` when both live in the same directory.
pub fn link_prefix(readme_path: &Path, scan_path: &Path) -> String {
    let readme_dir = normalize_path(readme_path.parent().unwrap_or(Path::new("")));
    let scan = normalize_path(scan_path);

    let from: Vec<_> = readme_dir.components().collect();
    let to: Vec<_> = scan.components().collect();
    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

    let mut parts: Vec<String> = vec!["..".to_string(); from.len() - common];
    parts.extend(
        to[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().to_string()),
    );

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "# x\n").unwrap();
    }

    fn default_ignore() -> Vec<String> {
        crate::storage::DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn finds_markdown_recursively() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b.md");
        touch(dir.path(), "a/intro.md");
        touch(dir.path(), "a/notes.txt");
        touch(dir.path(), "node_modules/pkg/readme.md");
        touch(dir.path(), "a/images/pic.md");

        let ignore = default_ignore();
        let paths = scan_docs(
            dir.path(),
            &ScanOptions {
                ignore: &ignore,
                max_depth: 5,
                exclude: None,
            },
        )
        .unwrap();

        assert_eq!(paths, vec!["a/intro.md", "b.md"]);
    }

    #[test]
    fn respects_max_depth() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "top.md");
        touch(dir.path(), "one/mid.md");
        touch(dir.path(), "one/two/deep.md");

        let paths = scan_docs(
            dir.path(),
            &ScanOptions {
                ignore: &[],
                max_depth: 2,
                exclude: None,
            },
        )
        .unwrap();

        assert_eq!(paths, vec!["one/mid.md", "top.md"]);
    }

    #[test]
    fn excludes_host_document() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "README.md");
        touch(dir.path(), "guide.md");

        let readme = dir.path().join("README.md");
        let paths = scan_docs(
            dir.path(),
            &ScanOptions {
                ignore: &[],
                max_depth: 3,
                exclude: Some(readme.as_path()),
            },
        )
        .unwrap();

        assert_eq!(paths, vec!["guide.md"]);
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = scan_docs(
            dir.path(),
            &ScanOptions {
                ignore: &[],
                max_depth: 3,
                exclude: None,
            },
        );
        assert!(matches!(result, Err(ScanError::NoMarkdownFiles(_))));
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = scan_docs(
            &dir.path().join("nope"),
            &ScanOptions {
                ignore: &[],
                max_depth: 3,
                exclude: None,
            },
        );
        assert!(matches!(result, Err(ScanError::MissingRoot(_))));
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.md");
        let ignore = vec!["a[".to_string()];

        let result = scan_docs(
            dir.path(),
            &ScanOptions {
                ignore: &ignore,
                max_depth: 3,
                exclude: None,
            },
        );
        assert!(matches!(result, Err(ScanError::InvalidPattern { .. })));
    }

    #[test]
    fn prefix_for_subdirectory() {
        assert_eq!(link_prefix(Path::new("README.md"), Path::new("docs")), "docs");
        assert_eq!(link_prefix(Path::new("README.md"), Path::new("docs/api")), "docs/api");
    }

    #[test]
    fn prefix_for_same_directory() {
        assert_eq!(link_prefix(Path::new("./README.md"), Path::new("./")), ".");
        assert_eq!(link_prefix(Path::new("README.md"), Path::new(".")), ".");
    }

    #[test]
    fn prefix_for_siblings() {
        assert_eq!(
            link_prefix(Path::new("packages/pkg-a/README.md"), Path::new("packages/pkg-b/docs")),
            "../pkg-b/docs"
        );
        assert_eq!(link_prefix(Path::new("a/b/c/README.md"), Path::new("a/b/d/e")), "../d/e");
    }

    #[test]
    fn prefix_for_absolute_paths() {
        assert_eq!(
            link_prefix(
                Path::new("/usr/user/project/README.md"),
                Path::new("/usr/user/project/src")
            ),
            "src"
        );
    }
}
