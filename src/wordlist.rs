// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use anyhow::{Context, Result};
use std::path::Path;

/// Load a candidate list from a file path or a single literal value.
///
/// If `source` names an existing file it is read as a line-oriented
/// wordlist: lines are trimmed and empty lines dropped. Otherwise the
/// value itself is the one-element list, so `--usernames admin` works the
/// same way as `--usernames users.txt`.
pub fn load_list(source: &str) -> Result<Vec<String>> {
    let path = Path::new(source);
    if !path.exists() {
        return Ok(vec![source.trim().to_string()]);
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read wordlist {}", source))?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_path_is_treated_as_literal() {
        let list = load_list("admin").unwrap();
        assert_eq!(list, vec!["admin".to_string()]);
    }

    #[test]
    fn test_file_is_read_line_by_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "alice").unwrap();
        writeln!(file, "  bob  ").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "carol").unwrap();

        let list = load_list(file.path().to_str().unwrap()).unwrap();
        assert_eq!(list, vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn test_empty_file_yields_empty_list() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let list = load_list(file.path().to_str().unwrap()).unwrap();
        assert!(list.is_empty());
    }
}
