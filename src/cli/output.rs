//! Output formatting for CLI commands
//!
//! Results go to stdout, either as text or as one JSON document per command.
//! Warnings, prompts and `--verbose` diagnostics go to stderr so JSON output
//! stays parseable.

use serde::Serialize;

use crate::domain::CleanupPreview;
use crate::injector::InjectionReport;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Output helper for consistent formatting
pub struct Output {
    format: OutputFormat,
    verbose: bool,
}

impl Output {
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self { format, verbose }
    }

    /// Prints a one-line status message
    pub fn message(&self, message: &str) {
        match self.format {
            OutputFormat::Text => println!("{}", message),
            OutputFormat::Json => self.data(&serde_json::json!({
                "success": true,
                "message": message
            })),
        }
    }

    /// Prints a warning to stderr (text only)
    pub fn warn(&self, message: &str) {
        if self.format == OutputFormat::Text {
            eprintln!("Warning: {}", message);
        }
    }

    /// Prints structured data
    pub fn data<T: Serialize>(&self, data: &T) {
        let json = match self.format {
            OutputFormat::Text => serde_json::to_string_pretty(data),
            OutputFormat::Json => serde_json::to_string(data),
        };
        if let Ok(json) = json {
            println!("{}", json);
        }
    }

    /// Prints the result of an injection
    ///
    /// On a dry run the rendered TOC is shown first, since nothing was written.
    pub fn injection(&self, report: &InjectionReport, rendered: &str) {
        if self.format == OutputFormat::Json {
            self.data(report);
            return;
        }

        if report.dry_run {
            print!("{}", rendered);
            println!();
        }
        for region in &report.removed_regions {
            println!(
                "Removed lines {}-{} ({})",
                region.start_line + 1,
                region.end_line + 1,
                region.kind
            );
        }
        if report.success {
            let prefix = if report.dry_run { "Dry run: " } else { "" };
            println!("{}{}", prefix, report.message);
        }
    }

    /// Prints what a cleanup would remove
    pub fn cleanup_preview(&self, preview: &CleanupPreview) {
        match self.format {
            OutputFormat::Text => println!("{}", preview.summary),
            OutputFormat::Json => self.data(preview),
        }
    }

    /// Prints a verbose debug message (only when --verbose is set)
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", message);
        }
    }

    /// Prints a verbose debug message with context (only when --verbose is set)
    pub fn verbose_ctx(&self, context: &str, message: &str) {
        if self.verbose {
            eprintln!("[verbose:{}] {}", context, message);
        }
    }
}
