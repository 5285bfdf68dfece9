use sixdeg::handlers::*;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

#[test]
fn test_parse_seed_lines_trims_and_skips_noise() {
    let content = "jane-doe\n  john-smith  \n\n# a comment\n   \nada-l\n";
    let seeds = parse_seed_lines(content);
    assert_eq!(seeds, vec!["jane-doe", "john-smith", "ada-l"]);
}

#[test]
fn test_parse_seed_lines_accepts_full_urls() {
    let content = "https://example.com/in/jane-doe\nbob\n";
    let seeds = parse_seed_lines(content);
    assert_eq!(seeds.len(), 2);
    assert_eq!(seeds[0], "https://example.com/in/jane-doe");
}

#[test]
fn test_load_seeds_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut temp_file = NamedTempFile::new()?;
    writeln!(temp_file, "jane-doe")?;
    writeln!(temp_file, "# seeds below came from the last run")?;
    writeln!(temp_file)?; // Empty line
    writeln!(temp_file, "john-smith")?;

    let path = PathBuf::from(temp_file.path());
    let seeds = load_seeds_from_file(&path)?;

    assert_eq!(seeds, vec!["jane-doe", "john-smith"]);

    Ok(())
}

#[test]
fn test_load_seeds_from_file_empty() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file).unwrap();
    writeln!(temp_file, "   ").unwrap();
    writeln!(temp_file, "# only a comment").unwrap();

    let path = PathBuf::from(temp_file.path());
    let result = load_seeds_from_file(&path);

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("no seeds"));
}

#[test]
fn test_load_seeds_from_missing_file() {
    let path = PathBuf::from("/definitely/not/a/real/seeds-file.txt");
    let result = load_seeds_from_file(&path);
    assert!(result.is_err());
}
