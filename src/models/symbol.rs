//! Symbol model definitions
//!
//! Core types for representing document symbols reported by a language server.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use super::position::Range;

/// A node of the symbol tree handed over by the provider.
/// A parent owns its children; trees are acyclic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub range: Range,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Symbol>,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind, range: Range) -> Self {
        Self {
            name: name.into(),
            kind,
            range,
            detail: None,
            children: Vec::new(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_children(mut self, children: Vec<Symbol>) -> Self {
        self.children = children;
        self
    }

    /// Total number of nodes in this subtree, including self
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Symbol::node_count).sum::<usize>()
    }

    /// Number of nodes across a forest
    pub fn count_all(symbols: &[Symbol]) -> usize {
        symbols.iter().map(Symbol::node_count).sum()
    }
}

/// Symbol classification (aligned with LSP SymbolKind)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    File,
    Module,
    Namespace,
    Package,
    Class,
    Method,
    Property,
    Field,
    Constructor,
    Enum,
    Interface,
    Function,
    Variable,
    Constant,
    String,
    Number,
    Boolean,
    Array,
    Object,
    Key,
    Null,
    EnumMember,
    Struct,
    Event,
    Operator,
    TypeParameter,
    /// Anything a provider reports outside the LSP table
    Other,
}

impl SymbolKind {
    /// Convert from LSP SymbolKind number
    pub fn from_lsp(kind: u32) -> Self {
        match kind {
            1 => Self::File,
            2 => Self::Module,
            3 => Self::Namespace,
            4 => Self::Package,
            5 => Self::Class,
            6 => Self::Method,
            7 => Self::Property,
            8 => Self::Field,
            9 => Self::Constructor,
            10 => Self::Enum,
            11 => Self::Interface,
            12 => Self::Function,
            13 => Self::Variable,
            14 => Self::Constant,
            15 => Self::String,
            16 => Self::Number,
            17 => Self::Boolean,
            18 => Self::Array,
            19 => Self::Object,
            20 => Self::Key,
            21 => Self::Null,
            22 => Self::EnumMember,
            23 => Self::Struct,
            24 => Self::Event,
            25 => Self::Operator,
            26 => Self::TypeParameter,
            _ => Self::Other,
        }
    }

    /// Kinds the navigator steps through: exactly functions, methods,
    /// constructors, classes and structs.
    pub fn is_jumpable(&self) -> bool {
        matches!(
            self,
            Self::Function | Self::Method | Self::Constructor | Self::Class | Self::Struct
        )
    }

    /// Spoken form, e.g. "enum member"
    pub fn spoken(&self) -> String {
        self.to_string().replace('_', " ")
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::File => "file",
            Self::Module => "module",
            Self::Namespace => "namespace",
            Self::Package => "package",
            Self::Class => "class",
            Self::Method => "method",
            Self::Property => "property",
            Self::Field => "field",
            Self::Constructor => "constructor",
            Self::Enum => "enum",
            Self::Interface => "interface",
            Self::Function => "function",
            Self::Variable => "variable",
            Self::Constant => "constant",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
            Self::Key => "key",
            Self::Null => "null",
            Self::EnumMember => "enum_member",
            Self::Struct => "struct",
            Self::Event => "event",
            Self::Operator => "operator",
            Self::TypeParameter => "type_parameter",
            Self::Other => "other",
        };
        write!(f, "{}", s)
    }
}

/// Languages the navigator knows how to label and, in degraded mode, scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Rust,
    Cpp,
    Java,
    Kotlin,
    CSharp,
    TypeScript,
    JavaScript,
    Python,
    Ruby,
    Go,
    #[default]
    Unknown,
}

impl Language {
    /// Detect language from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "rs" => Self::Rust,
            "c" | "cpp" | "cc" | "cxx" | "h" | "hpp" | "hxx" => Self::Cpp,
            "java" => Self::Java,
            "kt" | "kts" => Self::Kotlin,
            "cs" => Self::CSharp,
            "ts" | "tsx" | "mts" | "cts" => Self::TypeScript,
            "js" | "jsx" | "mjs" | "cjs" => Self::JavaScript,
            "py" | "pyi" => Self::Python,
            "rb" | "rake" => Self::Ruby,
            "go" => Self::Go,
            _ => Self::Unknown,
        }
    }

    /// Detect language from file path
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::Unknown)
    }

    /// Get LSP language ID
    pub fn lsp_id(&self) -> &'static str {
        match self {
            Self::Rust => "rust",
            Self::Cpp => "cpp",
            Self::Java => "java",
            Self::Kotlin => "kotlin",
            Self::CSharp => "csharp",
            Self::TypeScript => "typescript",
            Self::JavaScript => "javascript",
            Self::Python => "python",
            Self::Ruby => "ruby",
            Self::Go => "go",
            Self::Unknown => "plaintext",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lsp_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn make_symbol(name: &str, kind: SymbolKind) -> Symbol {
        Symbol::new(name, kind, Range::from_coords(0, 0, 1, 0))
    }

    #[test]
    fn test_symbol_kind_lsp_conversion() {
        assert_eq!(SymbolKind::from_lsp(5), SymbolKind::Class);
        assert_eq!(SymbolKind::from_lsp(12), SymbolKind::Function);
        assert_eq!(SymbolKind::from_lsp(23), SymbolKind::Struct);
    }

    #[test]
    fn test_unknown_lsp_kind_is_other() {
        assert_eq!(SymbolKind::from_lsp(0), SymbolKind::Other);
        assert_eq!(SymbolKind::from_lsp(255), SymbolKind::Other);
        assert!(!SymbolKind::Other.is_jumpable());
    }

    #[test]
    fn test_jumpable_set_is_fixed() {
        let jumpable: Vec<_> = (0..=27)
            .map(SymbolKind::from_lsp)
            .filter(SymbolKind::is_jumpable)
            .collect();
        assert_eq!(
            jumpable,
            vec![
                SymbolKind::Class,
                SymbolKind::Method,
                SymbolKind::Constructor,
                SymbolKind::Function,
                SymbolKind::Struct,
            ]
        );
        assert!(!SymbolKind::Interface.is_jumpable());
        assert!(!SymbolKind::Enum.is_jumpable());
    }

    #[test]
    fn test_symbol_kind_spoken() {
        assert_eq!(SymbolKind::EnumMember.spoken(), "enum member");
        assert_eq!(SymbolKind::Method.spoken(), "method");
    }

    #[test]
    fn test_node_count() {
        let class = make_symbol("Outer", SymbolKind::Class).with_children(vec![
            make_symbol("a", SymbolKind::Method),
            make_symbol("Inner", SymbolKind::Class)
                .with_children(vec![make_symbol("b", SymbolKind::Method)]),
        ]);
        assert_eq!(class.node_count(), 4);
        assert_eq!(
            Symbol::count_all(&[class, make_symbol("main", SymbolKind::Function)]),
            5
        );
    }

    #[test]
    fn test_language_from_path() {
        assert_eq!(
            Language::from_path(&PathBuf::from("app/main.py")),
            Language::Python
        );
        assert_eq!(Language::from_extension("RS"), Language::Rust);
        assert_eq!(Language::from_extension("txt"), Language::Unknown);
        assert_eq!(Language::Python.to_string(), "python");
    }
}
