//! URL list input

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// One URL per line; blank lines and `#` comments are skipped.
pub fn parse_url_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

pub fn load_url_file(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read URL file: {}", path.display()))?;
    Ok(parse_url_list(&content))
}

/// Positional URLs first, then the file's URLs, in order.
pub fn collect_urls(positional: &[String], file: Option<&Path>) -> Result<Vec<String>> {
    let mut urls: Vec<String> = positional
        .iter()
        .map(|u| u.trim())
        .filter(|u| !u.is_empty())
        .map(str::to_string)
        .collect();
    if let Some(path) = file {
        urls.extend(load_url_file(path)?);
    }
    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn skips_blank_lines_and_comments() {
        let urls = parse_url_list("# plumbers\nacme.test\n\n   \n  http://b.test  \n#done\n");
        assert_eq!(urls, vec!["acme.test", "http://b.test"]);
    }

    #[test]
    fn empty_file_gives_no_urls() {
        assert!(parse_url_list("").is_empty());
        assert!(parse_url_list("\n# only comments\n").is_empty());
    }

    #[test]
    fn handles_crlf() {
        assert_eq!(parse_url_list("a.test\r\nb.test\r\n"), vec!["a.test", "b.test"]);
    }

    #[test]
    fn collects_positional_then_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("urls.txt");
        fs::write(&file, "c.test\nd.test\n").unwrap();
        let urls = collect_urls(&["a.test".to_string(), " ".to_string()], Some(&file)).unwrap();
        assert_eq!(urls, vec!["a.test", "c.test", "d.test"]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = collect_urls(&[], Some(&dir.path().join("missing.txt"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read URL file"));
    }
}
