//! Course catalog: an in-memory, ordered map of course records.
//!
//! Courses are read from a comma-separated file into a binary search tree
//! keyed by course id ([`domain::CourseTree`]), looked up by exact id and
//! listed in ascending id order.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
