//! Cursor navigation between symbols
//!
//! A [`Navigator`] serves one editor. Every public operation resolves symbols
//! afresh; starting a query cancels the one still in flight, and a cancelled
//! query never touches the cursor or the announcer.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::error::ProviderError;
use crate::models::document::Document;
use crate::models::position::Position;

use super::announce::Debouncer;
use super::block::{BlockQuery, CurrentBlock, detect_current_block};
use super::editor::EditorControl;
use super::fallback::FallbackRegistry;
use super::jump::{JumpTarget, build_jump_targets};
use super::provider::{QueryOptions, SymbolProvider, query_symbols};
use super::tree::SymbolTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Previous,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Next => write!(f, "next"),
            Self::Previous => write!(f, "previous"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "next" | "n" => Ok(Self::Next),
            "previous" | "prev" | "p" => Ok(Self::Previous),
            other => Err(format!("Unknown direction: {other}")),
        }
    }
}

/// First target strictly after (Next) or strictly before (Previous) `cursor`.
/// `targets` must be in ascending position order. No wraparound.
pub fn select_target(
    targets: &[JumpTarget],
    cursor: Position,
    direction: Direction,
) -> Option<&JumpTarget> {
    match direction {
        Direction::Next => targets.iter().find(|t| t.position.is_after(&cursor)),
        Direction::Previous => targets.iter().rev().find(|t| t.position.is_before(&cursor)),
    }
}

/// Where a document's symbols came from
#[derive(Debug, Clone)]
pub enum SymbolSource {
    Provider(SymbolTree),
    /// Line-scan results; no ranges, so no blocks
    Degraded(Vec<JumpTarget>),
    Empty,
}

impl SymbolSource {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }

    pub fn targets(&self) -> Vec<JumpTarget> {
        match self {
            Self::Provider(tree) => build_jump_targets(tree),
            Self::Degraded(targets) => targets.clone(),
            Self::Empty => Vec::new(),
        }
    }

    pub fn tree(&self) -> Option<&SymbolTree> {
        match self {
            Self::Provider(tree) => Some(tree),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NavigationOutcome {
    Moved { target: JumpTarget, degraded: bool },
    NoSymbols,
    NoneInDirection { direction: Direction },
    /// A newer query took over before this one finished
    Superseded,
}

impl NavigationOutcome {
    pub fn message(&self) -> String {
        match self {
            Self::Moved { target, .. } => target.display_name.clone(),
            Self::NoSymbols => "no symbols".to_string(),
            Self::NoneInDirection { direction } => format!("no {direction} symbol"),
            Self::Superseded => "superseded by a newer request".to_string(),
        }
    }

    pub fn moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockOutcome {
    Found(CurrentBlock),
    NotInBlock(BlockQuery),
    Superseded,
}

impl BlockOutcome {
    pub fn message(&self) -> String {
        match self {
            Self::Found(block) => block.describe(),
            Self::NotInBlock(query) => format!("not inside a {}", query.label()),
            Self::Superseded => "superseded by a newer request".to_string(),
        }
    }
}

pub struct Navigator {
    provider: Arc<dyn SymbolProvider>,
    editor: Arc<dyn EditorControl>,
    announcer: Debouncer,
    fallback: Option<FallbackRegistry>,
    options: QueryOptions,
    inflight: Mutex<Option<CancellationToken>>,
}

impl Navigator {
    pub fn new(
        provider: Arc<dyn SymbolProvider>,
        editor: Arc<dyn EditorControl>,
        announcer: Debouncer,
    ) -> Self {
        let fallback = crate::config::fallback_enabled().then(FallbackRegistry::default);
        Self {
            provider,
            editor,
            announcer,
            fallback,
            options: QueryOptions::default(),
            inflight: Mutex::new(None),
        }
    }

    /// `None` disables degraded mode
    pub fn with_fallback(mut self, fallback: Option<FallbackRegistry>) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_query_options(mut self, options: QueryOptions) -> Self {
        self.options = options;
        self
    }

    /// Cancel the query in flight, if any, and hand out a fresh token
    fn begin_query(&self) -> CancellationToken {
        let token = CancellationToken::new();
        let mut inflight = self
            .inflight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(previous) = inflight.replace(token.clone()) {
            previous.cancel();
        }
        token
    }

    /// Provider symbols, else fallback targets, else nothing.
    /// Fails only with [`ProviderError::Cancelled`].
    pub async fn resolve(&self, document: &Document) -> Result<SymbolSource, ProviderError> {
        let token = self.begin_query();

        let symbols = match query_symbols(self.provider.as_ref(), document, &token, &self.options).await
        {
            Ok(symbols) => symbols,
            Err(e) if e.is_cancelled() => return Err(e),
            Err(e) => {
                tracing::warn!("Symbol provider failed for {}: {}", document.path.display(), e);
                Vec::new()
            }
        };

        if token.is_cancelled() {
            return Err(ProviderError::Cancelled);
        }

        if !symbols.is_empty() {
            return Ok(SymbolSource::Provider(SymbolTree::build(&symbols)));
        }

        match self.fallback.as_ref().and_then(|registry| registry.scan(document)) {
            Some(targets) if !targets.is_empty() => Ok(SymbolSource::Degraded(targets)),
            _ => Ok(SymbolSource::Empty),
        }
    }

    pub async fn jump_targets(&self, document: &Document) -> Result<SymbolSource, ProviderError> {
        self.resolve(document).await
    }

    /// Move the editor cursor to the adjacent symbol and announce it
    pub async fn move_cursor_to_symbol(
        &self,
        document: &Document,
        direction: Direction,
    ) -> NavigationOutcome {
        let source = match self.resolve(document).await {
            Ok(source) => source,
            Err(_) => return NavigationOutcome::Superseded,
        };

        let targets = source.targets();
        if targets.is_empty() {
            return NavigationOutcome::NoSymbols;
        }

        let cursor = self.editor.active_cursor();
        let Some(target) = select_target(&targets, cursor, direction) else {
            tracing::debug!("No {} symbol from {}", direction, cursor);
            return NavigationOutcome::NoneInDirection { direction };
        };

        self.editor.set_selection(target.position);
        self.editor.reveal_position(target.position);
        self.announcer.schedule(target.display_name.clone()).await;

        NavigationOutcome::Moved {
            target: target.clone(),
            degraded: source.is_degraded(),
        }
    }

    /// The block of kind `query` around the editor cursor
    pub async fn current_block(&self, document: &Document, query: BlockQuery) -> BlockOutcome {
        let source = match self.resolve(document).await {
            Ok(source) => source,
            Err(_) => return BlockOutcome::Superseded,
        };

        let cursor = self.editor.active_cursor();
        source
            .tree()
            .and_then(|tree| detect_current_block(tree, document, cursor, query))
            .map_or(BlockOutcome::NotInBlock(query), BlockOutcome::Found)
    }

    /// Speak a block summary through the same debounced channel as jumps
    pub async fn announce_block(&self, block: &CurrentBlock) {
        self.announcer.schedule(block.describe()).await;
    }

    /// Wait for the pending announcement before shutting down
    pub async fn settle(&self) {
        self.announcer.settle().await;
    }
}
