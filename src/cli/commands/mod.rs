//! Command implementations for symnav
//!
//! Each command is implemented in its own module.

pub mod block;
pub mod config;
pub mod jump;
pub mod session;
pub mod targets;
