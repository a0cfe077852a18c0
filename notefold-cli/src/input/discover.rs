//! Notebook file discovery
//!
//! Explicit inputs resolve through glob patterns; directory scans apply
//! the name filters and skip outputs of a previous run.

use anyhow::{Context, Result};
use glob::glob;
use std::path::{Path, PathBuf};

/// Resolve file patterns to actual file paths
pub fn resolve_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        let paths = glob(pattern).with_context(|| format!("Invalid glob pattern: {}", pattern))?;

        for path_result in paths {
            let path =
                path_result.with_context(|| format!("Error resolving pattern: {}", pattern))?;

            if path.is_file() {
                files.push(path);
            }
        }
    }

    if files.is_empty() {
        anyhow::bail!("No files found matching the provided patterns");
    }

    // Remove duplicates and sort
    files.sort();
    files.dedup();

    Ok(files)
}

/// List notebook exports in a directory: the file name must contain
/// `contains`, end with `ends_with`, and not carry the output `marker`
/// of a previous run.
pub fn scan_directory(
    dir: &Path,
    contains: &str,
    ends_with: &str,
    marker: &str,
) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Error listing: {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.contains(contains) && name.ends_with(ends_with) && !name.contains(marker) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
