use anyhow::{Context, Result};
use audesp_normalizer::normalize_with_stats;
use audesp_parser::{default_filename, load_filing, save_filing, write_filing};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::output;

pub fn execute(input: &Path, output_path: Option<&Path>) -> Result<()> {
    info!("Normalizing filing: {}", input.display());

    let filing = load_filing(input)
        .with_context(|| format!("Failed to read filing: {}", input.display()))?;
    let (normalized, stats) = normalize_with_stats(&filing);

    let Some(output_path) = output_path else {
        // stdout carries only the filing, so it can be piped
        println!(
            "{}",
            write_filing(&normalized).context("Failed to serialize normalized filing")?
        );
        return Ok(());
    };

    let target = resolve_target(output_path, &normalized);
    save_filing(&target, &normalized)
        .with_context(|| format!("Failed to write filing: {}", target.display()))?;

    output::print_normalize_stats(&stats);
    output::print_success(&format!("Normalized filing written to {}", target.display()));

    Ok(())
}

/// A directory target receives the filing under its suggested filename.
fn resolve_target(output_path: &Path, filing: &audesp_core::DocValue) -> PathBuf {
    if output_path.is_dir() {
        output_path.join(default_filename(filing))
    } else {
        output_path.to_path_buf()
    }
}
