//! Symbol arena and tree flattening
//!
//! Provider trees are copied into an arena indexed by [`SymbolId`]. Flattened
//! entries refer to their symbol and its ancestors by id, so the flat view never
//! borrows from or mutates the provider's tree.

use serde::Serialize;

use crate::models::position::Range;
use crate::models::symbol::{Symbol, SymbolKind};

/// Index of a symbol inside one [`SymbolArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SymbolId(usize);

impl SymbolId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct SymbolNode {
    pub name: String,
    pub kind: SymbolKind,
    pub range: Range,
    pub parent: Option<SymbolId>,
    pub children: Vec<SymbolId>,
}

/// Owned copy of a symbol forest. Ids are assigned in pre-order.
#[derive(Debug, Clone, Default)]
pub struct SymbolArena {
    nodes: Vec<SymbolNode>,
    roots: Vec<SymbolId>,
}

impl SymbolArena {
    pub fn from_symbols(symbols: &[Symbol]) -> Self {
        let mut arena = Self {
            nodes: Vec::with_capacity(Symbol::count_all(symbols)),
            roots: Vec::with_capacity(symbols.len()),
        };
        for symbol in symbols {
            let id = arena.insert(symbol, None);
            arena.roots.push(id);
        }
        arena
    }

    fn insert(&mut self, symbol: &Symbol, parent: Option<SymbolId>) -> SymbolId {
        let id = SymbolId(self.nodes.len());
        self.nodes.push(SymbolNode {
            name: symbol.name.clone(),
            kind: symbol.kind,
            range: symbol.range,
            parent,
            children: Vec::with_capacity(symbol.children.len()),
        });
        for child in &symbol.children {
            let child_id = self.insert(child, Some(id));
            self.nodes[id.0].children.push(child_id);
        }
        id
    }

    /// Look up a node. Ids are only minted by this arena.
    pub fn node(&self, id: SymbolId) -> &SymbolNode {
        &self.nodes[id.0]
    }

    pub fn roots(&self) -> &[SymbolId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Parent chain from the root down to the immediate parent
    pub fn ancestors_of(&self, id: SymbolId) -> Vec<SymbolId> {
        let mut chain = Vec::new();
        let mut current = self.node(id).parent;
        while let Some(parent) = current {
            chain.push(parent);
            current = self.node(parent).parent;
        }
        chain.reverse();
        chain
    }
}

/// One symbol of the flattened tree with its root-to-parent lineage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatEntry {
    pub id: SymbolId,
    pub ancestors: Vec<SymbolId>,
}

/// Depth-first pre-order walk, children in input order, each node exactly once
pub fn flatten(arena: &SymbolArena) -> Vec<FlatEntry> {
    let mut entries = Vec::with_capacity(arena.len());
    let mut path: Vec<SymbolId> = Vec::new();
    let mut stack: Vec<(SymbolId, usize)> = arena.roots().iter().rev().map(|&id| (id, 0)).collect();

    while let Some((id, depth)) = stack.pop() {
        path.truncate(depth);
        entries.push(FlatEntry {
            id,
            ancestors: path.clone(),
        });
        path.push(id);
        stack.extend(
            arena
                .node(id)
                .children
                .iter()
                .rev()
                .map(|&child| (child, depth + 1)),
        );
    }

    entries
}

/// Arena plus its flattened view, rebuilt for every query
#[derive(Debug, Clone, Default)]
pub struct SymbolTree {
    arena: SymbolArena,
    entries: Vec<FlatEntry>,
}

impl SymbolTree {
    pub fn build(symbols: &[Symbol]) -> Self {
        let arena = SymbolArena::from_symbols(symbols);
        let entries = flatten(&arena);
        Self { arena, entries }
    }

    pub fn arena(&self) -> &SymbolArena {
        &self.arena
    }

    pub fn entries(&self) -> &[FlatEntry] {
        &self.entries
    }

    pub fn node(&self, id: SymbolId) -> &SymbolNode {
        self.arena.node(id)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
