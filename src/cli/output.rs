//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.
//! The `render_*` functions produce plain text and are shared with the menu.

use colored::Colorize;
use generational_arena::Index;
use itertools::Itertools;
use termtree::Tree;

use crate::domain::{Course, CourseTree};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print failure status (red X, indented)
pub fn failure(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {} {}", "✗".red(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print plain output (no color, for data lines)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// One listing line: `CSCI300: Introduction to Algorithms | CSCI200 | MATH201`
pub fn render_course_line(course: &Course) -> String {
    std::iter::once(course.to_string())
        .chain(course.prerequisites().iter().cloned())
        .join(" | ")
}

/// Detail view of a single course, two lines.
pub fn render_course_detail(course: &Course) -> String {
    let prerequisites = if course.prerequisites().is_empty() {
        "none".to_string()
    } else {
        course.prerequisites().iter().join(", ")
    };
    format!("{}\nPrerequisites: {}", course, prerequisites)
}

pub fn render_not_found(id: &str) -> String {
    format!("Course Id {} not found.", id)
}

/// Shape of the search tree; missing children are shown as `-`.
pub fn render_structure(tree: &CourseTree) -> Tree<String> {
    fn build(tree: &CourseTree, idx: Index, label: &str) -> Tree<String> {
        let Some(node) = tree.node(idx) else {
            return Tree::new(format!("{}?", label));
        };
        let mut subtree = Tree::new(format!("{}{}", label, node.course.id()));
        if node.left.is_some() || node.right.is_some() {
            for (child, side) in [(node.left, "L "), (node.right, "R ")] {
                let leaf = match child {
                    Some(child) => build(tree, child, side),
                    None => Tree::new(format!("{}-", side)),
                };
                subtree.push(leaf);
            }
        }
        subtree
    }

    match tree.root() {
        Some(root) => build(tree, root, ""),
        None => Tree::new("Empty catalog".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: &str, title: &str, prereqs: &[&str]) -> Course {
        Course::new(id, title, prereqs).unwrap()
    }

    #[test]
    fn course_line_lists_prerequisites() {
        let c = course("CSCI300", "Introduction to Algorithms", &["CSCI200", "MATH201"]);
        assert_eq!(
            render_course_line(&c),
            "CSCI300: Introduction to Algorithms | CSCI200 | MATH201"
        );
        let c = course("CSCI100", "Introduction to Computer Science", &[]);
        assert_eq!(render_course_line(&c), "CSCI100: Introduction to Computer Science");
    }

    #[test]
    fn course_detail_says_none_without_prerequisites() {
        let c = course("MATH201", "Discrete Mathematics", &[]);
        assert_eq!(
            render_course_detail(&c),
            "MATH201: Discrete Mathematics\nPrerequisites: none"
        );
    }

    #[test]
    fn structure_marks_missing_children() {
        let mut tree = CourseTree::new();
        for id in ["B", "A"] {
            tree.insert(course(id, "T", &[]));
        }
        let rendered = render_structure(&tree).to_string();
        assert!(rendered.starts_with("B\n"));
        assert!(rendered.contains("L A"));
        assert!(rendered.contains("R -"));
    }
}
