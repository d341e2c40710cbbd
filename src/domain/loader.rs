//! Catalog loader: turns comma-separated course lines into [`Course`] values.
//!
//! Format, one course per line:
//!
//! ```text
//! CSCI200,Data Structures,CSCI101
//! CSCI300,Introduction to Algorithms,CSCI200,MATH201
//! ```
//!
//! Field 0 is the identifier, field 1 the title, the remaining fields are
//! prerequisites. There is no header row and no quoting.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::domain::course::Course;
use crate::domain::error::{DomainError, DomainResult};

const FIELD_SEPARATOR: char = ',';

/// What to do with a line that does not describe a valid course.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedLinePolicy {
    /// Leave the line out and report it
    #[default]
    Skip,
    /// Abort loading on the first bad line
    Fail,
}

/// A line left out under [`MalformedLinePolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number
    pub line: usize,
    pub reason: String,
}

/// Courses parsed from one source, in file order.
#[derive(Debug, Clone, Default)]
pub struct LoadedCourses {
    pub courses: Vec<Course>,
    pub skipped: Vec<SkippedLine>,
}

#[derive(Debug, Clone, Default)]
pub struct CatalogLoader {
    policy: MalformedLinePolicy,
}

impl CatalogLoader {
    pub fn new(policy: MalformedLinePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> MalformedLinePolicy {
        self.policy
    }

    /// Parse every line of `source`. Blank lines are ignored.
    #[instrument(level = "debug", skip(self, source), fields(policy = ?self.policy))]
    pub fn produce(&self, source: &str) -> DomainResult<LoadedCourses> {
        let mut loaded = LoadedCourses::default();

        for (n, text) in source.lines().enumerate() {
            let line_no = n + 1;
            if text.trim().is_empty() {
                continue;
            }

            match parse_line(text, line_no) {
                Ok(course) => loaded.courses.push(course),
                Err(DomainError::MalformedLine { line, reason })
                    if self.policy == MalformedLinePolicy::Skip =>
                {
                    warn!("skipping line {}: {}", line, reason);
                    loaded.skipped.push(SkippedLine { line, reason });
                }
                Err(e) => return Err(e),
            }
        }

        debug!(
            "produced {} courses, skipped {} lines",
            loaded.courses.len(),
            loaded.skipped.len()
        );
        Ok(loaded)
    }
}

/// Parse a single line into a course.
///
/// # Errors
/// [`DomainError::MalformedLine`] if the line has fewer than two fields,
/// an empty identifier or title, or more than two prerequisites.
pub fn parse_line(line: &str, line_no: usize) -> DomainResult<Course> {
    let fields: Vec<&str> = line.trim_end_matches('\r').split(FIELD_SEPARATOR).collect();

    if fields.len() < 2 {
        return Err(DomainError::MalformedLine {
            line: line_no,
            reason: format!("expected at least 2 fields, found {}", fields.len()),
        });
    }

    Course::new(fields[0], fields[1], &fields[2..]).map_err(|e| match e {
        DomainError::InvalidCourse { reason, .. } => DomainError::MalformedLine {
            line: line_no,
            reason,
        },
        other => other,
    })
}
