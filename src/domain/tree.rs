//! Ordered map of courses: an unbalanced binary search tree keyed by course id.
//!
//! Nodes live in a generational arena and refer to their children by
//! [`Index`]. Removed slots go back to the arena's free list, and dropping
//! the tree drops the arena, which releases every node exactly once.

use std::cmp::Ordering;
use std::collections::VecDeque;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::course::Course;

/// Tree node in the arena.
#[derive(Debug)]
pub struct CourseNode {
    /// Course stored at this node
    pub course: Course,
    /// Subtree with smaller ids
    pub left: Option<Index>,
    /// Subtree with greater ids
    pub right: Option<Index>,
}

/// The slot that points at a node: either the root or a child link of a parent.
#[derive(Debug, Clone, Copy)]
enum Link {
    Root,
    Left(Index),
    Right(Index),
}

/// Binary search tree of courses.
///
/// Inserting an id that is already present replaces the stored course
/// (upsert), so ids are unique. There is no rebalancing: inserting ids in
/// sorted order degrades the tree into a chain.
#[derive(Debug, Default)]
pub struct CourseTree {
    /// Node storage; every child link and the root refer to live slots
    arena: Arena<CourseNode>,
    /// Index of the root node, None for an empty tree
    root: Option<Index>,
}

impl CourseTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of courses in the tree.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn node(&self, idx: Index) -> Option<&CourseNode> {
        self.arena.get(idx)
    }

    /// Insert a course, replacing any course with the same id.
    ///
    /// Returns the replaced course, or `None` if the id was new.
    #[instrument(level = "trace", skip(self, course), fields(id = %course.id()))]
    pub fn insert(&mut self, course: Course) -> Option<Course> {
        let mut link = Link::Root;
        let mut cursor = self.root;

        while let Some(idx) = cursor {
            let node = &mut self.arena[idx];
            match course.id().cmp(node.course.id()) {
                Ordering::Equal => return Some(std::mem::replace(&mut node.course, course)),
                Ordering::Less => {
                    link = Link::Left(idx);
                    cursor = node.left;
                }
                Ordering::Greater => {
                    link = Link::Right(idx);
                    cursor = node.right;
                }
            }
        }

        let idx = self.arena.insert(CourseNode {
            course,
            left: None,
            right: None,
        });
        self.set_link(link, Some(idx));
        None
    }

    /// Look up a course by exact id.
    #[instrument(level = "trace", skip(self))]
    pub fn find(&self, id: &str) -> Option<&Course> {
        self.locate(id).map(|(_, idx)| &self.arena[idx].course)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.locate(id).is_some()
    }

    /// Remove a course by id and return it. Absent ids leave the tree untouched.
    ///
    /// A node with two children takes over the course of its in-order
    /// successor, and the successor's node is unlinked from the right subtree.
    #[instrument(level = "trace", skip(self))]
    pub fn remove(&mut self, id: &str) -> Option<Course> {
        let (link, idx) = self.locate(id)?;
        let (left, right) = {
            let node = &self.arena[idx];
            (node.left, node.right)
        };

        match (left, right) {
            (Some(_), Some(right)) => {
                let (succ_link, succ) = self.leftmost(Link::Right(idx), right);
                let succ_right = self.arena[succ].right;
                self.set_link(succ_link, succ_right);
                let successor = self.arena.remove(succ)?;
                let node = &mut self.arena[idx];
                Some(std::mem::replace(&mut node.course, successor.course))
            }
            (child, None) | (None, child) => {
                self.set_link(link, child);
                self.arena.remove(idx).map(|node| node.course)
            }
        }
    }

    /// Remove every course.
    #[instrument(level = "debug", skip(self))]
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    /// In-order iterator over the courses, ascending by id.
    pub fn iter(&self) -> InOrderIter<'_> {
        InOrderIter::new(self)
    }

    /// Number of nodes on the longest root-to-leaf path; 0 for an empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn height(&self) -> usize {
        let mut max_depth = 0;
        let mut queue = VecDeque::new();
        if let Some(root) = self.root {
            queue.push_back((root, 1));
        }

        while let Some((idx, depth)) = queue.pop_front() {
            max_depth = max_depth.max(depth);
            let node = &self.arena[idx];
            for child in [node.left, node.right].into_iter().flatten() {
                queue.push_back((child, depth + 1));
            }
        }

        max_depth
    }

    /// Descend to the node holding `id`, returning it with the link that points at it.
    fn locate(&self, id: &str) -> Option<(Link, Index)> {
        let mut link = Link::Root;
        let mut cursor = self.root;

        while let Some(idx) = cursor {
            let node = &self.arena[idx];
            match id.cmp(node.course.id()) {
                Ordering::Equal => return Some((link, idx)),
                Ordering::Less => {
                    link = Link::Left(idx);
                    cursor = node.left;
                }
                Ordering::Greater => {
                    link = Link::Right(idx);
                    cursor = node.right;
                }
            }
        }
        None
    }

    /// Leftmost node of the subtree at `idx`, reached through `link`.
    fn leftmost(&self, mut link: Link, mut idx: Index) -> (Link, Index) {
        while let Some(left) = self.arena[idx].left {
            link = Link::Left(idx);
            idx = left;
        }
        (link, idx)
    }

    fn set_link(&mut self, link: Link, child: Option<Index>) {
        match link {
            Link::Root => self.root = child,
            Link::Left(parent) => self.arena[parent].left = child,
            Link::Right(parent) => self.arena[parent].right = child,
        }
    }
}

impl<'a> IntoIterator for &'a CourseTree {
    type Item = &'a Course;
    type IntoIter = InOrderIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order traversal with an explicit stack of pending ancestors.
pub struct InOrderIter<'a> {
    tree: &'a CourseTree,
    stack: Vec<Index>,
}

impl<'a> InOrderIter<'a> {
    fn new(tree: &'a CourseTree) -> Self {
        let mut iter = Self {
            tree,
            stack: Vec::new(),
        };
        iter.push_left_spine(tree.root);
        iter
    }

    fn push_left_spine(&mut self, mut cursor: Option<Index>) {
        while let Some(idx) = cursor {
            self.stack.push(idx);
            cursor = self.tree.arena[idx].left;
        }
    }
}

impl<'a> Iterator for InOrderIter<'a> {
    type Item = &'a Course;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let tree = self.tree;
        let node = &tree.arena[idx];
        self.push_left_spine(node.right);
        Some(&node.course)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: &str) -> Course {
        Course::new(id, &format!("Title of {id}"), Vec::<String>::new()).unwrap()
    }

    /// Walk every link and check ordering, reachability and parent uniqueness.
    fn assert_well_formed(tree: &CourseTree) {
        fn walk(
            tree: &CourseTree,
            idx: Index,
            lower: Option<&str>,
            upper: Option<&str>,
            seen: &mut Vec<Index>,
        ) {
            assert!(!seen.contains(&idx), "node reachable twice");
            seen.push(idx);
            let node = tree.node(idx).expect("link to a freed slot");
            let id = node.course.id();
            if let Some(lower) = lower {
                assert!(id > lower, "{id} not greater than {lower}");
            }
            if let Some(upper) = upper {
                assert!(id < upper, "{id} not less than {upper}");
            }
            if let Some(left) = node.left {
                walk(tree, left, lower, Some(id), seen);
            }
            if let Some(right) = node.right {
                walk(tree, right, Some(id), upper, seen);
            }
        }

        let mut seen = Vec::new();
        if let Some(root) = tree.root() {
            walk(tree, root, None, None, &mut seen);
        }
        assert_eq!(seen.len(), tree.len(), "unreachable nodes left in arena");
    }

    #[test]
    fn links_stay_ordered_through_every_removal_case() {
        let mut tree = CourseTree::new();
        for id in ["M", "F", "T", "B", "H", "P", "W", "A", "G", "N", "R"] {
            tree.insert(course(id));
        }
        assert_well_formed(&tree);

        // leaves, an inner node with two children, then the root
        for id in ["A", "B", "T", "M"] {
            assert!(tree.remove(id).is_some());
            assert_well_formed(&tree);
        }
        assert_eq!(tree.len(), 7);
    }

    #[test]
    fn removing_root_with_deep_successor_relinks_successor_child() {
        let mut tree = CourseTree::new();
        for id in ["D", "B", "H", "F", "G"] {
            tree.insert(course(id));
        }
        // successor of D is F, which has a right child G
        let removed = tree.remove("D").unwrap();
        assert_eq!(removed.id(), "D");
        assert_well_formed(&tree);
        let root = tree.root().unwrap();
        assert_eq!(tree.node(root).unwrap().course.id(), "F");
        assert!(tree.contains("G"));
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut tree = CourseTree::new();
        tree.insert(course("A"));
        tree.insert(course("B"));
        let root = tree.root().unwrap();
        let (freed_slot, freed_generation) = tree.node(root).unwrap().right.unwrap().into_raw_parts();

        tree.remove("B");
        tree.insert(course("C"));

        let (slot, generation) = tree.node(root).unwrap().right.unwrap().into_raw_parts();
        assert_eq!(slot, freed_slot);
        assert_ne!(generation, freed_generation);
        assert_well_formed(&tree);
    }
}
