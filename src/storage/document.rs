//! Host document access
//!
//! The host document is read once and written once per run. Writes go through
//! a temp file and a rename so a crash never leaves a half-written README.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Line-oriented view of the host document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostDocument {
    pub path: PathBuf,
    pub lines: Vec<String>,

    /// False when the file did not exist and `lines` is empty
    pub existed: bool,
}

impl HostDocument {
    /// Reads the document; a missing file yields an empty line sequence
    pub fn read(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let (content, existed) = match fs::read_to_string(&path) {
            Ok(content) => (content, true),
            Err(e) if e.kind() == ErrorKind::NotFound => (String::new(), false),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read document: {}", path.display()))
            }
        };

        Ok(Self {
            lines: split_lines(&content),
            path,
            existed,
        })
    }

    /// Full text as it would be written for `lines`
    pub fn render(lines: &[String]) -> String {
        let mut content = lines.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }
        content
    }

    /// Returns true if writing `lines` would change the file
    pub fn differs(&self, lines: &[String]) -> bool {
        !self.existed || self.lines != lines
    }

    /// Writes `lines` atomically (temp file + rename)
    pub fn write(&self, lines: &[String]) -> Result<()> {
        write_atomic(&self.path, &Self::render(lines))
    }
}

/// Splits on LF or CRLF
pub fn split_lines(content: &str) -> Vec<String> {
    content.lines().map(str::to_string).collect()
}

fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;

    fs::rename(&temp_path, path).with_context(|| {
        format!(
            "Failed to rename {} to {}",
            temp_path.display(),
            path.display()
        )
    })?;

    Ok(())
}
