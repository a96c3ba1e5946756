//! Data models for symnav
//!
//! Contains core type definitions used throughout the application.

pub mod config;
pub mod document;
pub mod position;
pub mod symbol;

// Re-export commonly used types
pub use config::NavConfig;
pub use document::Document;
pub use position::{Position, Range};
pub use symbol::{Language, Symbol, SymbolKind};
