//! Core module - fundamental types and utilities

pub mod config;
pub mod identity;

pub use config::Config;
pub use identity::{IdParseError, RecordId, RecordPrefix};
