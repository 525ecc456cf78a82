//! Utility functions and helpers for the Kiln host

pub mod fs;

pub use fs::ensure_dir_exists;
