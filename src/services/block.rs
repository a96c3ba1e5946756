//! Innermost enclosing block lookup

use serde::Serialize;

use crate::models::document::Document;
use crate::models::position::{Position, Range};
use crate::models::symbol::SymbolKind;

use super::tree::{FlatEntry, SymbolId, SymbolTree};

/// Which kind of block the caller is asking about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockQuery {
    Class,
    /// Functions and methods
    Callable,
}

impl BlockQuery {
    pub fn matches(self, kind: SymbolKind) -> bool {
        match self {
            Self::Class => kind == SymbolKind::Class,
            Self::Callable => matches!(kind, SymbolKind::Function | SymbolKind::Method),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Callable => "function",
        }
    }
}

/// The block under the cursor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentBlock {
    #[serde(skip)]
    pub id: SymbolId,
    pub name: String,
    pub kind: SymbolKind,
    pub range: Range,
    /// 0-indexed first line of the block
    pub first_line: u32,
    /// 0-indexed last line of the block
    pub last_line: u32,
    pub text: String,
    /// Some ancestor of the block is a class
    pub selection_in_class: bool,
}

impl CurrentBlock {
    /// Spoken boundary summary, 1-indexed lines
    pub fn describe(&self) -> String {
        let mut out = format!(
            "{} {}, lines {} to {}",
            self.kind.spoken(),
            self.name.trim(),
            self.first_line + 1,
            self.last_line + 1
        );
        if self.selection_in_class {
            out.push_str(", inside a class");
        }
        out
    }
}

/// Find the innermost symbol matching `query` whose range contains `cursor`.
/// Equal sizes resolve to the entry met first in flattening order.
pub fn find_enclosing(tree: &SymbolTree, cursor: Position, query: BlockQuery) -> Option<&FlatEntry> {
    tree.entries()
        .iter()
        .filter(|entry| {
            let node = tree.node(entry.id);
            node.range.contains(cursor) && query.matches(node.kind)
        })
        .min_by_key(|entry| tree.node(entry.id).range.size())
}

/// Locate the current block and gather what callers display or speak.
/// `None` means the cursor is not inside any matching block.
pub fn detect_current_block(
    tree: &SymbolTree,
    document: &Document,
    cursor: Position,
    query: BlockQuery,
) -> Option<CurrentBlock> {
    let entry = find_enclosing(tree, cursor, query)?;
    let id = entry.id;
    let node = tree.node(id);

    let selection_in_class = entry
        .ancestors
        .iter()
        .any(|&ancestor| tree.node(ancestor).kind == SymbolKind::Class);
    let (first_line, last_line) = node.range.line_span();

    tracing::debug!(
        "Cursor {} is inside {} '{}' ({}..{})",
        cursor,
        node.kind,
        node.name,
        first_line,
        last_line
    );

    Some(CurrentBlock {
        id,
        name: node.name.clone(),
        kind: node.kind,
        range: node.range,
        first_line,
        last_line,
        text: document.text_in(&node.range),
        selection_in_class,
    })
}
