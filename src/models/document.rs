//! Source document snapshot

use std::path::{Path, PathBuf};

use crate::error::DocumentError;

use super::position::{Position, Range};
use super::symbol::Language;

/// Read-only snapshot of a document as the host editor holds it
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub language: Language,
    pub text: String,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            language: Language::from_path(&path),
            path,
            text: text.into(),
        }
    }

    /// Load from disk, refusing files above `max_bytes` (0 = unlimited)
    pub async fn load(path: &Path, max_bytes: u64) -> Result<Self, DocumentError> {
        let metadata = tokio::fs::metadata(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DocumentError::NotFound(path.to_path_buf())
            } else {
                DocumentError::Io(e)
            }
        })?;

        if max_bytes > 0 && metadata.len() > max_bytes {
            return Err(DocumentError::TooLarge {
                path: path.display().to_string(),
                size_mb: metadata.len() / (1024 * 1024),
                limit_mb: max_bytes / (1024 * 1024),
            });
        }

        let text = tokio::fs::read_to_string(path).await?;
        tracing::debug!("Loaded {} ({} bytes)", path.display(), text.len());
        Ok(Self::new(path, text))
    }

    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }

    /// Source text between the range endpoints. Columns count chars and are
    /// clamped to the line length; lines past the end are ignored.
    pub fn text_in(&self, range: &Range) -> String {
        let lines: Vec<&str> = self.text.lines().collect();
        let start = range.start;
        let end = range.end.max(range.start);

        if start.line as usize >= lines.len() {
            return String::new();
        }
        let last_line = (end.line as usize).min(lines.len() - 1);

        let mut out = String::new();
        for (idx, line) in lines
            .iter()
            .enumerate()
            .take(last_line + 1)
            .skip(start.line as usize)
        {
            let from = if idx == start.line as usize {
                start.character as usize
            } else {
                0
            };
            let to = if idx == end.line as usize {
                end.character as usize
            } else {
                usize::MAX
            };

            if idx > start.line as usize {
                out.push('\n');
            }
            out.extend(line.chars().skip(from).take(to.saturating_sub(from)));
        }
        out
    }

    /// Clamp a position into the document bounds
    pub fn clamp(&self, pos: Position) -> Position {
        let lines: Vec<&str> = self.text.lines().collect();
        if lines.is_empty() {
            return Position::default();
        }
        let line = (pos.line as usize).min(lines.len() - 1);
        let width = lines[line].chars().count() as u32;
        Position::new(line as u32, pos.character.min(width))
    }
}
