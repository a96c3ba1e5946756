//! Degraded-mode definition scanning
//!
//! Used only when the symbol provider returns nothing. Scanners look at one
//! line at a time with a language-specific pattern: no nesting, no qualified
//! names, and nothing outside the one language each scanner understands.
//! Results are best effort and are labelled as degraded to callers.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::models::document::Document;
use crate::models::position::Position;
use crate::models::symbol::{Language, SymbolKind};

use super::jump::JumpTarget;

/// A line-pattern strategy for one language
pub trait FallbackScanner: Send + Sync {
    fn language(&self) -> Language;

    /// Definitions in textual order
    fn scan(&self, text: &str) -> Vec<JumpTarget>;
}

static PYTHON_DEF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<indent>[ \t]*)(?:async[ \t]+)?(?P<keyword>def|class)[ \t]+(?P<name>[A-Za-z_][A-Za-z0-9_]*)")
        .expect("valid python definition pattern")
});

/// `def`, `async def` and `class` introducers in Python source
#[derive(Debug, Default, Clone, Copy)]
pub struct PythonScanner;

impl FallbackScanner for PythonScanner {
    fn language(&self) -> Language {
        Language::Python
    }

    fn scan(&self, text: &str) -> Vec<JumpTarget> {
        text.lines()
            .enumerate()
            .filter_map(|(line_idx, line)| {
                let caps = PYTHON_DEF_RE.captures(line)?;
                let name = caps.name("name")?.as_str();
                let column = caps.name("indent").map_or(0, |m| m.as_str().chars().count());
                let kind = match caps.name("keyword").map(|m| m.as_str()) {
                    Some("class") => SymbolKind::Class,
                    _ => SymbolKind::Function,
                };
                Some(
                    JumpTarget::new(Position::new(line_idx as u32, column as u32), name)
                        .with_kind(kind),
                )
            })
            .collect()
    }
}

/// Picks a scanner by document language
#[derive(Clone)]
pub struct FallbackRegistry {
    scanners: Vec<Arc<dyn FallbackScanner>>,
}

impl Default for FallbackRegistry {
    fn default() -> Self {
        Self {
            scanners: vec![Arc::new(PythonScanner)],
        }
    }
}

impl FallbackRegistry {
    pub fn empty() -> Self {
        Self {
            scanners: Vec::new(),
        }
    }

    pub fn register(&mut self, scanner: Arc<dyn FallbackScanner>) {
        self.scanners.retain(|s| s.language() != scanner.language());
        self.scanners.push(scanner);
    }

    pub fn scanner_for(&self, language: Language) -> Option<&Arc<dyn FallbackScanner>> {
        self.scanners.iter().find(|s| s.language() == language)
    }

    /// Degraded targets for `document`, `None` when no scanner covers its language
    pub fn scan(&self, document: &Document) -> Option<Vec<JumpTarget>> {
        let Some(scanner) = self.scanner_for(document.language) else {
            tracing::debug!(
                "No fallback scanner for {} ({})",
                document.language,
                document.path.display()
            );
            return None;
        };

        let targets = scanner.scan(&document.text);
        tracing::info!(
            "Degraded mode: {} definitions found by line scan in {}",
            targets.len(),
            document.path.display()
        );
        Some(targets)
    }
}
