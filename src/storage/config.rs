//! Configuration handling for doctoc
//!
//! Configuration is read from `toc.toml` in the working directory. Every key
//! is optional; command-line flags override file values.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Config file name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "toc.toml";

/// Paths always excluded from scanning
pub const DEFAULT_IGNORE: &[&str] = &[
    "**/node_modules/**",
    "**/.git/**",
    "**/dist/**",
    "**/images/**",
    "**/assets/**",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Contents of `toc.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    /// Directory to scan for markdown files
    pub base_dir: String,

    /// Host document receiving the table of contents
    pub out_file: String,

    /// Extra glob patterns to exclude
    pub ignore: Vec<String>,

    /// Maximum directory depth to descend into
    pub max_depth: usize,

    /// Heading placed above a freshly appended TOC section
    pub heading: String,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            base_dir: "docs".to_string(),
            out_file: "README.md".to_string(),
            ignore: vec![],
            max_depth: 3,
            heading: "## Table of Contents".to_string(),
        }
    }
}

fn check_depth(depth: usize) -> Result<(), ConfigError> {
    if depth == 0 {
        return Err(ConfigError::Invalid("max_depth must be at least 1".to_string()));
    }
    Ok(())
}

impl UserConfig {
    fn validate(self) -> Result<Self, ConfigError> {
        check_depth(self.max_depth)?;
        if self.out_file.trim().is_empty() {
            return Err(ConfigError::Invalid("out_file must not be empty".to_string()));
        }
        Ok(self)
    }
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory the config was resolved against
    pub cwd: PathBuf,

    /// Absolute directory to scan
    pub scan_path: PathBuf,

    /// Absolute path of the host document
    pub readme_path: PathBuf,

    /// Built-in and user ignore globs
    pub ignore: Vec<String>,

    pub max_depth: usize,

    pub heading: String,
}

impl Config {
    /// Loads configuration for the current working directory
    pub fn load() -> Result<(Self, Option<ConfigError>)> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        Self::load_from(&cwd)
    }

    /// Loads configuration for `cwd`
    ///
    /// A config file that fails to parse is returned as a warning alongside
    /// the defaults rather than aborting the run.
    pub fn load_from(cwd: &Path) -> Result<(Self, Option<ConfigError>)> {
        let config_path = cwd.join(CONFIG_FILE_NAME);

        let (user, warning) = if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

            match Self::parse(&content) {
                Ok(user) => (user, None),
                Err(e) => (UserConfig::default(), Some(e)),
            }
        } else {
            (UserConfig::default(), None)
        };

        Ok((Self::resolve(cwd, user), warning))
    }

    /// Parses and validates a config file body
    pub fn parse(content: &str) -> Result<UserConfig, ConfigError> {
        let user: UserConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        user.validate()
    }

    /// Resolves user settings against a working directory
    pub fn resolve(cwd: &Path, user: UserConfig) -> Self {
        let mut ignore: Vec<String> = DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect();
        ignore.extend(user.ignore);

        Self {
            cwd: cwd.to_path_buf(),
            scan_path: cwd.join(&user.base_dir),
            readme_path: cwd.join(&user.out_file),
            ignore,
            max_depth: user.max_depth,
            heading: user.heading,
        }
    }

    /// Overrides the scan directory (relative to the working directory)
    pub fn with_scan_dir(mut self, dir: &str) -> Self {
        self.scan_path = self.cwd.join(dir);
        self
    }

    /// Overrides the host document path (relative to the working directory)
    pub fn with_readme(mut self, path: &str) -> Self {
        self.readme_path = self.cwd.join(path);
        self
    }

    /// Overrides the scan depth; zero is rejected like in `toc.toml`
    pub fn with_max_depth(mut self, depth: usize) -> Result<Self, ConfigError> {
        check_depth(depth)?;
        self.max_depth = depth;
        Ok(self)
    }

    /// Writes a commented default `toc.toml`, returning false if one exists
    pub fn write_default(cwd: &Path) -> Result<bool> {
        let config_path = cwd.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Ok(false);
        }

        let default_config = r###"# doctoc configuration

# Directory scanned for markdown files
base_dir = "docs"

# Document that receives the table of contents
out_file = "README.md"

# Extra glob patterns to skip (node_modules, .git, dist, images and assets are always skipped)
ignore = []

# Maximum directory depth
max_depth = 3

# Heading written above a newly appended TOC
heading = "## Table of Contents"
"###;
        fs::write(&config_path, default_config)
            .with_context(|| format!("Failed to write config: {}", config_path.display()))?;

        Ok(true)
    }
}
