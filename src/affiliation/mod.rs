mod resolver;
mod types;

pub use resolver::{parse_history, resolve, sanitize_institution};
pub use types::*;

/// Separator between multiple entries for a single author
pub const ENTRY_SEPARATOR: &str = " && ";

/// Replacement for literal commas inside institution names
pub const COMMA_REPLACEMENT: &str = " || ";
