//! Env file parsing.
//!
//! One `KEY=VALUE` assignment per line:
//! - blank lines and lines starting with `#` are skipped
//! - an optional leading `export ` is ignored
//! - bare values end at an inline ` #` comment and are trimmed
//! - `'single'` quotes are literal
//! - `"double"` quotes interpret `\n`, `\"` and `\\`
//!
//! A line without `=`, with a second unescaped `=` in a bare value, or with an
//! unterminated quote rejects the whole file.

use super::source::{RawEntry, Source};
use crate::error::ConfigError;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// A malformed line, numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {reason}")]
pub struct LineError {
    pub line: usize,
    pub reason: String,
}

impl LineError {
    fn new(line: usize, reason: impl Into<String>) -> Self {
        Self {
            line,
            reason: reason.into(),
        }
    }
}

/// Read and parse the env file at `path`.
///
/// Entries come back in file order with keys exactly as written.
pub fn load(path: &Path) -> Result<Vec<RawEntry>, ConfigError> {
    let bytes = std::fs::read(path).map_err(|source| ConfigError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let parse_error = |e: LineError| ConfigError::FileParse {
        path: path.to_path_buf(),
        line: e.line,
        reason: e.reason,
    };
    let content = decode(&bytes).map_err(parse_error)?;
    let entries = parse(content).map_err(parse_error)?;

    debug!(path = %path.display(), count = entries.len(), "Parsed env file");
    Ok(entries)
}

/// Validate that `bytes` are UTF-8, naming the first line that is not.
fn decode(bytes: &[u8]) -> Result<&str, LineError> {
    std::str::from_utf8(bytes).map_err(|e| {
        let valid = &bytes[..e.valid_up_to()];
        let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
        LineError::new(line, "invalid UTF-8")
    })
}

/// Parse env file content.
pub fn parse(content: &str) -> Result<Vec<RawEntry>, LineError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut entries = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let number = idx + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line
            .strip_prefix("export ")
            .map(str::trim_start)
            .unwrap_or(line);

        let Some((key, rest)) = line.split_once('=') else {
            return Err(LineError::new(number, "missing '='"));
        };

        let key = key.trim();
        if !is_valid_key(key) {
            return Err(LineError::new(number, format!("invalid key {key:?}")));
        }

        let value = parse_value(rest.trim_start()).map_err(|reason| LineError::new(number, reason))?;
        entries.push(RawEntry::new(key, value, Source::File));
    }

    Ok(entries)
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

fn parse_value(raw: &str) -> Result<String, String> {
    if let Some(rest) = raw.strip_prefix('"') {
        parse_double_quoted(rest)
    } else if let Some(rest) = raw.strip_prefix('\'') {
        let Some(end) = rest.find('\'') else {
            return Err("unterminated single quote".to_string());
        };
        expect_trailer(&rest[end + 1..])?;
        Ok(rest[..end].to_string())
    } else {
        parse_bare(raw)
    }
}

fn parse_double_quoted(rest: &str) -> Result<String, String> {
    let mut value = String::new();
    let mut chars = rest.char_indices();

    while let Some((idx, c)) = chars.next() {
        match c {
            '"' => {
                expect_trailer(&rest[idx + 1..])?;
                return Ok(value);
            }
            '\\' => match chars.next() {
                Some((_, 'n')) => value.push('\n'),
                Some((_, '"')) => value.push('"'),
                Some((_, '\\')) => value.push('\\'),
                Some((_, other)) => {
                    value.push('\\');
                    value.push(other);
                }
                None => break,
            },
            c => value.push(c),
        }
    }

    Err("unterminated double quote".to_string())
}

fn parse_bare(raw: &str) -> Result<String, String> {
    let mut value = String::new();
    let mut chars = raw.chars().peekable();
    let mut prev_space = true;

    while let Some(c) = chars.next() {
        match c {
            '#' if prev_space => break,
            '\\' if chars.peek() == Some(&'=') => {
                value.push('=');
                chars.next();
            }
            '=' => return Err("unexpected '=' in unquoted value".to_string()),
            c => value.push(c),
        }
        prev_space = c.is_whitespace();
    }

    Ok(value.trim_end().to_string())
}

/// After a closing quote only whitespace or a comment may follow.
fn expect_trailer(trailer: &str) -> Result<(), String> {
    let trailer = trailer.trim_start();
    if trailer.is_empty() || trailer.starts_with('#') {
        Ok(())
    } else {
        Err(format!("unexpected {trailer:?} after closing quote"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn pairs(content: &str) -> Vec<(String, String)> {
        parse(content)
            .unwrap()
            .into_iter()
            .map(|e| (e.key, e.value))
            .collect()
    }

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn test_parse_bare_assignments() {
        assert_eq!(
            pairs("CLI_LEFT=32\nCLI_RIGHT=10\n"),
            vec![pair("CLI_LEFT", "32"), pair("CLI_RIGHT", "10")]
        );
    }

    #[test]
    fn test_keys_keep_case() {
        assert_eq!(pairs("Cli_Hex=true"), vec![pair("Cli_Hex", "true")]);
    }

    #[test]
    fn test_skips_blank_lines_and_comments() {
        let content = "\n# a comment\n   \nA=1 # trailing\n  # indented comment\nB=2\n";
        assert_eq!(pairs(content), vec![pair("A", "1"), pair("B", "2")]);
    }

    #[test]
    fn test_hash_inside_bare_value_is_kept() {
        assert_eq!(pairs("COLOR=red#1"), vec![pair("COLOR", "red#1")]);
    }

    #[test]
    fn test_export_prefix_and_spacing() {
        assert_eq!(
            pairs("export NAME = value here  "),
            vec![pair("NAME", "value here")]
        );
    }

    #[test]
    fn test_empty_value() {
        assert_eq!(pairs("EMPTY="), vec![pair("EMPTY", "")]);
    }

    #[test]
    fn test_single_quotes_are_literal() {
        assert_eq!(
            pairs(r#"PATTERN='a\nb = "c"'"#),
            vec![pair("PATTERN", r#"a\nb = "c""#)]
        );
    }

    #[test]
    fn test_double_quote_escapes() {
        assert_eq!(
            pairs(r#"MSG="line1\nsaid \"hi\" \\ \t" # comment"#),
            vec![pair("MSG", "line1\nsaid \"hi\" \\ \\t")]
        );
    }

    #[test]
    fn test_quoted_value_may_contain_equals() {
        assert_eq!(pairs(r#"URL="a=b""#), vec![pair("URL", "a=b")]);
    }

    #[test]
    fn test_escaped_equals_in_bare_value() {
        assert_eq!(pairs(r"EXPR=a\=b"), vec![pair("EXPR", "a=b")]);
    }

    #[test]
    fn test_missing_equals_names_line() {
        let err = parse("A=1\n\nBROKEN\n").unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(err.reason, "missing '='");
    }

    #[test]
    fn test_second_unescaped_equals_rejected() {
        let err = parse("A=b=c").unwrap_err();
        assert_eq!(err.line, 1);
    }

    #[test]
    fn test_unterminated_quotes_rejected() {
        assert_eq!(parse("A=\"open").unwrap_err().reason, "unterminated double quote");
        assert_eq!(parse("A='open").unwrap_err().reason, "unterminated single quote");
    }

    #[test]
    fn test_text_after_closing_quote_rejected() {
        assert!(parse("A=\"x\" y").is_err());
    }

    #[test]
    fn test_invalid_key_rejected() {
        assert!(parse("=value").is_err());
        assert!(parse("MY KEY=value").is_err());
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let temp = TempDir::new().unwrap();
        let err = load(&temp.path().join(".env")).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }

    #[test]
    fn test_load_malformed_file_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".env");
        std::fs::write(&path, "CLI_LEFT=32\nnot an assignment\n").unwrap();

        match load(&path).unwrap_err() {
            ConfigError::FileParse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_invalid_utf8_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".env");
        std::fs::write(&path, b"CLI_RIGHT=10\n\nCLI_LEFT=\xff\n").unwrap();

        match load(&path).unwrap_err() {
            ConfigError::FileParse { line, reason, .. } => {
                assert_eq!(line, 3);
                assert_eq!(reason, "invalid UTF-8");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_tags_entries_as_file_source() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".env");
        std::fs::write(&path, "CLI_LEFT=32\nCLI_RIGHT=10\n").unwrap();

        let entries = load(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.source == Source::File));
    }
}
