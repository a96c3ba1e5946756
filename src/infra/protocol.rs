//! LSP document symbol wire types
//!
//! Accepts what `textDocument/documentSymbol` may return: a nested
//! `DocumentSymbol[]`, a flat `SymbolInformation[]`, or either wrapped in a
//! JSON-RPC response envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::position::Range;
use crate::models::symbol::{Symbol, SymbolKind};

/// Document symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSymbol {
    #[serde(default)]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Raw LSP kind number; unknown values map to `SymbolKind::Other`
    #[serde(default)]
    pub kind: u32,
    /// Required by LSP but some servers omit it
    #[serde(default)]
    pub range: Range,
    #[serde(default)]
    pub selection_range: Range,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<DocumentSymbol>>,
}

/// Location in a document (LSP wire format)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LspLocation {
    pub uri: String,
    #[serde(default)]
    pub range: Range,
}

/// Symbol information (flat form)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInformation {
    pub name: String,
    pub kind: u32,
    pub location: LspLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_name: Option<String>,
}

/// Result of `textDocument/documentSymbol`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentSymbolResponse {
    Flat(Vec<SymbolInformation>),
    Nested(Vec<DocumentSymbol>),
}

impl DocumentSymbolResponse {
    /// Parse a saved response, unwrapping a JSON-RPC envelope if present.
    /// `null` results (server had nothing) become an empty nested list.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let payload = match value {
            Value::Object(mut obj) if obj.contains_key("jsonrpc") || obj.contains_key("result") => {
                obj.remove("result").unwrap_or(Value::Null)
            }
            other => other,
        };

        if payload.is_null() {
            return Ok(Self::Nested(Vec::new()));
        }
        serde_json::from_value(payload)
    }

    pub fn into_symbols(self) -> Vec<Symbol> {
        match self {
            Self::Nested(symbols) => symbols.into_iter().map(convert_document_symbol).collect(),
            Self::Flat(infos) => infos.into_iter().map(convert_symbol_information).collect(),
        }
    }
}

fn convert_document_symbol(doc_sym: DocumentSymbol) -> Symbol {
    let range = if doc_sym.range.is_degenerate() && !doc_sym.selection_range.is_degenerate() {
        doc_sym.selection_range
    } else {
        doc_sym.range
    };

    if range.is_degenerate() {
        tracing::debug!("Symbol '{}' arrived without a usable range", doc_sym.name);
    }

    let mut symbol = Symbol::new(doc_sym.name, SymbolKind::from_lsp(doc_sym.kind), range);
    if let Some(detail) = doc_sym.detail {
        symbol = symbol.with_detail(detail);
    }
    if let Some(children) = doc_sym.children {
        symbol = symbol.with_children(children.into_iter().map(convert_document_symbol).collect());
    }
    symbol
}

fn convert_symbol_information(info: SymbolInformation) -> Symbol {
    let mut symbol = Symbol::new(
        info.name,
        SymbolKind::from_lsp(info.kind),
        info.location.range,
    );
    if let Some(container) = info.container_name {
        symbol = symbol.with_detail(container);
    }
    symbol
}
