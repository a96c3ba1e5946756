//! Service layer for symnav

pub mod announce;
pub mod block;
pub mod config;
pub mod editor;
pub mod fallback;
pub mod jump;
pub mod navigator;
pub mod provider;
pub mod tree;

pub use announce::{AnnouncementSink, CommandSink, Debouncer, FanoutSink, RecordingSink};
pub use block::{BlockQuery, CurrentBlock, detect_current_block, find_enclosing};
pub use config::{ConfigService, DefaultConfigService};
pub use editor::{EditorControl, SessionEditor};
pub use fallback::{FallbackRegistry, FallbackScanner, PythonScanner};
pub use jump::{JumpTarget, build_jump_targets};
pub use navigator::{
    BlockOutcome, Direction, NavigationOutcome, Navigator, SymbolSource, select_target,
};
pub use provider::{JsonSymbolProvider, QueryOptions, StaticSymbolProvider, SymbolProvider};
pub use tree::{FlatEntry, SymbolArena, SymbolId, SymbolTree, flatten};
