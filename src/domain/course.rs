//! Course record: the value stored in the catalog

use std::fmt;

use crate::domain::error::{DomainError, DomainResult};

/// Maximum number of prerequisites a course can list.
pub const MAX_PREREQUISITES: usize = 2;

/// A single catalog entry.
///
/// The identifier is the ordering key of the catalog. It is compared
/// case-sensitively and byte-wise, without any normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: String,
    title: String,
    prerequisites: Vec<String>,
}

impl Course {
    /// Build a course, trimming whitespace around every field.
    ///
    /// Empty prerequisite entries are dropped, so `["CS101", ""]` yields a
    /// single prerequisite.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidCourse`] if the identifier or title is
    /// empty, or if more than [`MAX_PREREQUISITES`] prerequisites remain.
    pub fn new<I, S>(id: &str, title: &str, prerequisites: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let id = id.trim();
        let title = title.trim();

        if id.is_empty() {
            return Err(DomainError::InvalidCourse {
                id: String::new(),
                reason: "empty course identifier".to_string(),
            });
        }
        if title.is_empty() {
            return Err(DomainError::InvalidCourse {
                id: id.to_string(),
                reason: "empty title".to_string(),
            });
        }

        let prerequisites: Vec<String> = prerequisites
            .into_iter()
            .map(|p| p.as_ref().trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();

        if prerequisites.len() > MAX_PREREQUISITES {
            return Err(DomainError::InvalidCourse {
                id: id.to_string(),
                reason: format!(
                    "{} prerequisites listed, at most {} allowed",
                    prerequisites.len(),
                    MAX_PREREQUISITES
                ),
            });
        }

        Ok(Self {
            id: id.to_string(),
            title: title.to_string(),
            prerequisites,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Prerequisite identifiers in file order. Not checked against the catalog.
    pub fn prerequisites(&self) -> &[String] {
        &self.prerequisites
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.title)
    }
}
