//! Infrastructure layer for symnav
//!
//! Wire formats and low-level async helpers.

pub mod protocol;
pub mod retry;

pub use protocol::DocumentSymbolResponse;
pub use retry::{RetryConfig, with_retry, with_timeout};
