//! Utility functions

pub mod path;

pub use path::{is_hidden, normalize_path, relative_path, to_safe_name};
