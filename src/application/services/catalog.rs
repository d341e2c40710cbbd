//! Catalog service
//!
//! Owns the course tree for one session and (re)loads it from a catalog file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{CatalogLoader, Course, CourseTree, InOrderIter, SkippedLine};
use crate::infrastructure::traits::FileSystem;

/// Outcome of a successful load.
#[derive(Debug, Clone)]
pub struct LoadReport {
    /// File the catalog was read from
    pub path: PathBuf,
    /// Courses in the catalog after the load
    pub loaded: usize,
    /// Lines whose id was already seen earlier in the file (last one wins)
    pub replaced: usize,
    /// Malformed lines left out
    pub skipped: Vec<SkippedLine>,
}

/// Service holding the course catalog of a session.
pub struct CatalogService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
    tree: CourseTree,
    source: Option<PathBuf>,
}

impl CatalogService {
    /// Create a service with an empty catalog.
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self {
            fs,
            settings,
            tree: CourseTree::new(),
            source: None,
        }
    }

    /// Replace the catalog with the courses in `path`.
    ///
    /// The file is read and parsed completely before the current catalog is
    /// touched, so on error the previous courses are still in place.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&mut self, path: &Path) -> ApplicationResult<LoadReport> {
        if !self.fs.exists(path) {
            return Err(ApplicationError::CatalogNotFound(path.to_path_buf()));
        }
        if !self.fs.is_file(path) {
            return Err(ApplicationError::NotAFile(path.to_path_buf()));
        }

        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read catalog", path)?;

        let loader = CatalogLoader::new(self.settings.on_malformed);
        let parsed = loader.produce(&content)?;

        self.tree.clear();
        let mut replaced = 0;
        for course in parsed.courses {
            if let Some(previous) = self.tree.insert(course) {
                debug!("duplicate id {} replaced", previous.id());
                replaced += 1;
            }
        }
        self.source = Some(path.to_path_buf());

        info!(
            "loaded {} courses from {} ({} replaced, {} skipped)",
            self.tree.len(),
            path.display(),
            replaced,
            parsed.skipped.len()
        );

        Ok(LoadReport {
            path: path.to_path_buf(),
            loaded: self.tree.len(),
            replaced,
            skipped: parsed.skipped,
        })
    }

    pub fn find(&self, id: &str) -> Option<&Course> {
        self.tree.find(id)
    }

    /// Remove a course from the in-memory catalog. The file is not modified.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, id: &str) -> Option<Course> {
        let removed = self.tree.remove(id);
        debug!("remove {}: {}", id, if removed.is_some() { "done" } else { "absent" });
        removed
    }

    /// All courses in ascending id order.
    pub fn courses(&self) -> InOrderIter<'_> {
        self.tree.iter()
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn tree(&self) -> &CourseTree {
        &self.tree
    }

    /// File of the last successful load.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
