use anyhow::{Context, Result, bail};
use std::fs;
use std::path::PathBuf;

/// Parse seed identifiers out of newline-delimited text. Blank lines and
/// `#` comment lines are skipped; surrounding whitespace is trimmed.
pub fn parse_seed_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Load seed identifiers from a seeds file; a file with no usable lines
/// is an error.
pub fn load_seeds_from_file(path: &PathBuf) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read seeds file {}", path.display()))?;
    let seeds = parse_seed_lines(&content);
    if seeds.is_empty() {
        bail!("no seeds found in {}", path.display());
    }
    Ok(seeds)
}
