//! Location parsing for CLI commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::models::position::Position;

#[derive(Debug, Clone)]
pub struct ParsedLocation {
    pub file: PathBuf,
    /// 1-indexed
    pub line: u32,
    /// 1-indexed
    pub column: u32,
}

impl ParsedLocation {
    /// Parse location string and convert to absolute path in one step
    pub fn parse_absolute(input: &str) -> Result<Self> {
        Self::parse(input)?.to_absolute()
    }

    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            bail!("Location cannot be empty");
        }

        let (file_part, rest) = Self::split_path_and_position(input)?;
        let file = PathBuf::from(file_part);
        let (line, column) = parse_numbers(rest)?;

        Ok(Self { file, line, column })
    }

    fn split_path_and_position(input: &str) -> Result<(&str, &str)> {
        let is_windows = input.len() > 2
            && input.as_bytes().get(1) == Some(&b':')
            && input.as_bytes().first().map(|b| b.is_ascii_alphabetic()) == Some(true);

        let search_start = if is_windows { 2 } else { 0 };
        let search_range = &input[search_start..];

        let split = search_range.char_indices().find_map(|(byte_idx, ch)| {
            if ch != ':' {
                return None;
            }
            let abs_pos = search_start + byte_idx;
            match input[abs_pos + 1..].chars().next() {
                Some(c) if c.is_ascii_digit() => Some((abs_pos, false)),
                Some('-') => Some((abs_pos, true)),
                _ => None,
            }
        });

        match split {
            None => bail!(
                "Invalid location format. Expected: file:line[:column]\nExample: src/app.py:10:5"
            ),
            Some((_, true)) => bail!(
                "Invalid line number: negative values not allowed. Line numbers are 1-indexed positive integers.\nExample: src/app.py:10:5"
            ),
            Some((pos, false)) => Ok((&input[..pos], &input[pos + 1..])),
        }
    }

    /// Canonicalize the file path
    pub fn to_absolute(&self) -> Result<Self> {
        let file = if self.file.is_absolute() {
            self.file.clone()
        } else {
            std::env::current_dir()
                .context("Failed to get current directory")?
                .join(&self.file)
        };

        let canonical = file
            .canonicalize()
            .map_err(|_| anyhow::anyhow!("File not found: {}", file.display()))?;

        Ok(Self {
            file: canonical,
            line: self.line,
            column: self.column,
        })
    }

    /// 0-indexed cursor position
    pub fn position(&self) -> Position {
        Position::from_cli(self.line, self.column)
    }

    /// Validate position with pre-read content
    pub fn validate_position_with_content(&self, content: &str) -> Result<()> {
        let lines: Vec<&str> = content.lines().collect();
        let line_count = lines.len().max(1);

        if self.line as usize > line_count {
            bail!(
                "Line {} exceeds file length ({} lines)",
                self.line,
                line_count
            );
        }

        if let Some(line_content) = lines.get((self.line - 1) as usize) {
            let col_max = line_content.chars().count() + 1;
            if self.column as usize > col_max {
                bail!(
                    "Column {} exceeds line length ({} chars) at line {}",
                    self.column,
                    col_max - 1,
                    self.line
                );
            }
        }

        Ok(())
    }
}

impl std::fmt::Display for ParsedLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// Canonicalize a bare file argument
pub fn absolute_file(path: &Path) -> Result<PathBuf> {
    let file = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .context("Failed to get current directory")?
            .join(path)
    };
    file.canonicalize()
        .map_err(|_| anyhow::anyhow!("File not found: {}", file.display()))
}

/// `line[:column]`, 1-indexed, into a 0-indexed position
pub fn parse_line_col(input: &str) -> Result<Position> {
    let (line, column) = parse_numbers(input.trim())?;
    Ok(Position::from_cli(line, column))
}

fn parse_numbers(rest: &str) -> Result<(u32, u32)> {
    let mut parts = rest.splitn(2, ':');

    let line_str = parts.next().unwrap_or("");
    let line: u32 = line_str.parse().map_err(|_| {
        anyhow::anyhow!(
            "Invalid line number '{}': must be a positive integer (1-indexed)",
            line_str
        )
    })?;

    let column: u32 = match parts.next() {
        Some(col_str) => col_str.parse().map_err(|_| {
            anyhow::anyhow!(
                "Invalid column number '{}': must be a positive integer (1-indexed)",
                col_str
            )
        })?,
        None => 1,
    };

    if line == 0 {
        bail!("Line number must be >= 1 (got 0). Line numbers are 1-indexed.");
    }
    if column == 0 {
        bail!("Column number must be >= 1 (got 0). Column numbers are 1-indexed.");
    }

    Ok((line, column))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_location() {
        let loc = ParsedLocation::parse("src/app.py:10:5").unwrap();
        assert_eq!(loc.file, PathBuf::from("src/app.py"));
        assert_eq!(loc.line, 10);
        assert_eq!(loc.column, 5);
        assert_eq!(loc.position(), Position::new(9, 4));
    }

    #[test]
    fn test_parse_without_column() {
        let loc = ParsedLocation::parse("src/app.py:10").unwrap();
        assert_eq!(loc.column, 1);
        assert_eq!(loc.position(), Position::new(9, 0));
    }

    #[test]
    fn test_parse_unicode_path() {
        let loc = ParsedLocation::parse("/tmp/한글_테스트.py:10:5").unwrap();
        assert_eq!(loc.file, PathBuf::from("/tmp/한글_테스트.py"));
        assert_eq!(loc.line, 10);
    }

    #[test]
    fn test_parse_windows_path() {
        let loc = ParsedLocation::parse("C:\\Users\\test\\app.py:10:5").unwrap();
        assert_eq!(loc.file, PathBuf::from("C:\\Users\\test\\app.py"));
        assert_eq!(loc.line, 10);
        assert_eq!(loc.column, 5);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(ParsedLocation::parse("invalid").is_err());
        assert!(ParsedLocation::parse("app.py").is_err());
        assert!(ParsedLocation::parse("app.py:0:1").is_err());
        assert!(ParsedLocation::parse("").is_err());

        let err = ParsedLocation::parse("app.py:-5:1").unwrap_err();
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn test_display() {
        let loc = ParsedLocation::parse("src/app.py:10:5").unwrap();
        assert_eq!(loc.to_string(), "src/app.py:10:5");
    }

    #[test]
    fn test_parse_line_col() {
        assert_eq!(parse_line_col("1:1").unwrap(), Position::new(0, 0));
        assert_eq!(parse_line_col("12").unwrap(), Position::new(11, 0));
        assert!(parse_line_col("0:3").is_err());
        assert!(parse_line_col("x").is_err());
    }

    #[test]
    fn test_validate_position_with_content() {
        let content = "line1\nline2\nline3";
        let inside = ParsedLocation::parse("t.py:2:5").unwrap();
        assert!(inside.validate_position_with_content(content).is_ok());

        let past_end = ParsedLocation::parse("t.py:10:1").unwrap();
        assert!(past_end.validate_position_with_content(content).is_err());

        let wide = ParsedLocation::parse("t.py:1:9").unwrap();
        assert!(wide.validate_position_with_content(content).is_err());
    }

    #[test]
    fn test_absolute_file_missing() {
        let err = absolute_file(Path::new("/definitely/not/here.py")).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }
}
