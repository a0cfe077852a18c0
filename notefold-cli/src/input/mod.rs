//! Input discovery module

pub mod discover;

pub use discover::{resolve_patterns, scan_directory};
