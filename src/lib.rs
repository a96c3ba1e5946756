//! symnav - structural code navigation
//!
//! Turns a language service's document symbols into "which block am I in" and
//! "jump to the next/previous definition" answers, with debounced spoken
//! announcements for screen-reader users.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod infra;
pub mod models;
pub mod services;

pub use error::{NavError, NavResult};
