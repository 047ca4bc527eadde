//! Interactive cleanup confirmation

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use crate::domain::CleanupPreview;

/// Shows the preview and asks on the terminal whether to proceed
pub fn confirm_cleanup(preview: &CleanupPreview) -> Result<bool> {
    let stdin = io::stdin();
    let mut stderr = io::stderr();
    ask(preview, &mut stdin.lock(), &mut stderr)
}

/// Only an explicit `y`/`yes` confirms; anything else, including EOF, declines
fn ask<R: BufRead, W: Write>(preview: &CleanupPreview, input: &mut R, out: &mut W) -> Result<bool> {
    writeln!(out, "{}", preview.summary).context("Failed to write prompt")?;
    write!(out, "Proceed with cleanup? (y/N): ").context("Failed to write prompt")?;
    out.flush().context("Failed to flush prompt")?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;

    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
