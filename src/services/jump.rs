//! Jump target construction

use serde::Serialize;

use crate::models::position::Position;
use crate::models::symbol::SymbolKind;

use super::tree::{FlatEntry, SymbolTree};

/// Name used when a symbol and all of its ancestors are nameless
pub const UNNAMED: &str = "(unnamed)";

/// Separator between ancestor names in a display name
pub const NAME_SEPARATOR: &str = "::";

/// A navigable (position, display name) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JumpTarget {
    pub position: Position,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<SymbolKind>,
}

impl JumpTarget {
    pub fn new(position: Position, display_name: impl Into<String>) -> Self {
        Self {
            position,
            display_name: display_name.into(),
            kind: None,
        }
    }

    pub fn with_kind(mut self, kind: SymbolKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// `Outer::Inner::name`, skipping blank segments
pub fn display_name(tree: &SymbolTree, entry: &FlatEntry) -> String {
    let chain: Vec<&str> = entry
        .ancestors
        .iter()
        .chain(std::iter::once(&entry.id))
        .map(|&id| tree.node(id).name.trim())
        .filter(|name| !name.is_empty())
        .collect();

    if chain.is_empty() {
        UNNAMED.to_string()
    } else {
        chain.join(NAME_SEPARATOR)
    }
}

/// Jumpable symbols in document order.
/// The sort is stable, so symbols sharing a start keep flattening order.
pub fn build_jump_targets(tree: &SymbolTree) -> Vec<JumpTarget> {
    let mut targets: Vec<JumpTarget> = tree
        .entries()
        .iter()
        .filter(|entry| tree.node(entry.id).kind.is_jumpable())
        .map(|entry| {
            let node = tree.node(entry.id);
            let position = if node.range.is_degenerate() {
                Position::default()
            } else {
                node.range.start
            };
            JumpTarget::new(position, display_name(tree, entry)).with_kind(node.kind)
        })
        .collect();

    targets.sort_by_key(|target| target.position);
    targets
}
