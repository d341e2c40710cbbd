//! Domain layer: course records, the ordered map and the line parser
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod course;
pub mod error;
pub mod loader;
pub mod tree;

pub use course::{Course, MAX_PREREQUISITES};
pub use error::{DomainError, DomainResult};
pub use loader::{parse_line, CatalogLoader, LoadedCourses, MalformedLinePolicy, SkippedLine};
pub use tree::{CourseNode, CourseTree, InOrderIter};

/// Expand `~` and `$VAR` in a path-like string, returning it unchanged on failure.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
