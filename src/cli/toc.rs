//! TOC generation and preview commands

use anyhow::Result;

use super::output::Output;
use super::prompt;
use crate::domain::{build_tree_from_paths, render_markdown, sort_tree};
use crate::injector::{self, InjectOptions, InjectionOutcome};
use crate::storage::{enrich_tree, link_prefix, scan_docs, Config, ScanOptions};

/// Flags accepted by `doctoc generate`
#[derive(Debug, Clone, Default)]
pub struct GenerateArgs {
    pub dir: Option<String>,
    pub out: Option<String>,
    pub depth: Option<usize>,
    pub yes: bool,
    pub dry_run: bool,
}

/// Loads config and applies command-line overrides
fn load_config(
    output: &Output,
    dir: Option<&str>,
    out: Option<&str>,
    depth: Option<usize>,
) -> Result<Config> {
    let (mut config, warning) = Config::load()?;

    if let Some(warning) = warning {
        output.warn(&format!("{}; using default configuration", warning));
    }
    if let Some(dir) = dir {
        config = config.with_scan_dir(dir);
    }
    if let Some(out) = out {
        config = config.with_readme(out);
    }
    if let Some(depth) = depth {
        config = config.with_max_depth(depth)?;
    }

    output.verbose_ctx(
        "config",
        &format!(
            "scan={} readme={} depth={}",
            config.scan_path.display(),
            config.readme_path.display(),
            config.max_depth
        ),
    );
    Ok(config)
}

/// Renders the TOC markdown for the configured docs tree
pub fn render_toc(output: &Output, config: &Config) -> Result<String> {
    let paths = scan_docs(
        &config.scan_path,
        &ScanOptions {
            ignore: &config.ignore,
            max_depth: config.max_depth,
            exclude: Some(config.readme_path.as_path()),
        },
    )?;
    output.verbose_ctx("scan", &format!("Found {} markdown file(s)", paths.len()));

    let prefix = link_prefix(&config.readme_path, &config.scan_path);
    output.verbose_ctx("scan", &format!("Link prefix: {}", prefix));

    let mut tree = build_tree_from_paths(&paths, &prefix);
    for failed in enrich_tree(&mut tree, &config.scan_path) {
        output.warn(&format!("Could not read {}; using its file name", failed));
    }
    sort_tree(&mut tree);

    Ok(render_markdown(&tree))
}

/// Runs the full pipeline: scan, render, inject
pub fn generate(output: &Output, args: &GenerateArgs) -> Result<()> {
    let config = load_config(output, args.dir.as_deref(), args.out.as_deref(), args.depth)?;
    let markdown = render_toc(output, &config)?;

    let options = InjectOptions {
        heading: &config.heading,
        dry_run: args.dry_run,
    };
    let yes = args.yes;

    let report = injector::inject(&config.readme_path, &markdown, &options, |preview| {
        output.verbose_ctx("inject", &format!("{} stale region(s)", preview.regions.len()));
        if yes {
            Ok(true)
        } else {
            prompt::confirm_cleanup(preview)
        }
    })?;

    output.verbose_ctx("inject", &format!("Outcome: {:?}", report.outcome));

    output.injection(&report, &markdown);

    if report.outcome == InjectionOutcome::CleanupDeclined {
        anyhow::bail!("{}", report.message);
    }

    Ok(())
}

/// Prints the cleanup preview for the host document
pub fn preview(output: &Output, out: Option<&str>) -> Result<()> {
    let config = load_config(output, None, out, None)?;
    let preview = injector::preview(&config.readme_path)?;

    output.cleanup_preview(&preview);
    Ok(())
}
