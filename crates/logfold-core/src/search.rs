#![forbid(unsafe_code)]

//! Lazy depth-first search over a build-output forest.
//!
//! [`SearchIter`] yields node handles whose kind (and optionally exact
//! message) matches the query. Within each root, children are yielded before
//! the node that contains them, siblings in child order; roots are visited in
//! root order. A viewer asking for the first error therefore lands on the
//! deepest-leftmost one, with the enclosing target and project following.
//!
//! The traversal is driven by an explicit work stack rather than native
//! recursion, so pathologically deep trees cannot overflow the call stack.
//! Iteration has no side effects; re-invoking re-traverses from scratch.

use crate::node::{Forest, Node, NodeId, NodeKind};

impl Forest {
    /// Search for nodes of `kind`, optionally requiring `message` to match
    /// exactly.
    ///
    /// # Example
    /// ```
    /// use logfold_core::{NodeKind, OutputBuilder};
    ///
    /// let mut builder = OutputBuilder::new();
    /// builder.add_node(NodeKind::Target, "Compile", true);
    /// builder.add_node(NodeKind::Error, "boom", false);
    /// builder.end_current_node("failed");
    ///
    /// let hits: Vec<_> = builder.forest().search(NodeKind::Error, None).collect();
    /// assert_eq!(hits.len(), 1);
    /// ```
    #[must_use]
    pub fn search<'a>(&'a self, kind: NodeKind, message: Option<&'a str>) -> SearchIter<'a> {
        // Roots are pushed reversed so the first root is traversed first.
        let stack = self
            .roots()
            .iter()
            .rev()
            .map(|&id| Frame { id, next_child: 0 })
            .collect();
        SearchIter {
            forest: self,
            kind,
            message,
            stack,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    id: NodeId,
    next_child: usize,
}

/// Lazy iterator over matching nodes. See [`Forest::search`].
#[derive(Debug, Clone)]
pub struct SearchIter<'a> {
    forest: &'a Forest,
    kind: NodeKind,
    message: Option<&'a str>,
    stack: Vec<Frame>,
}

impl SearchIter<'_> {
    fn matches(&self, node: &Node) -> bool {
        node.kind() == self.kind && self.message.is_none_or(|m| node.message() == m)
    }
}

impl<'a> Iterator for SearchIter<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let forest = self.forest;
        while let Some(frame) = self.stack.last_mut() {
            let node = &forest[frame.id];
            if let Some(&child) = node.children().get(frame.next_child) {
                frame.next_child += 1;
                self.stack.push(Frame {
                    id: child,
                    next_child: 0,
                });
                continue;
            }
            // All children visited: the node itself closes.
            let id = frame.id;
            self.stack.pop();
            if self.matches(node) {
                return Some(id);
            }
        }
        None
    }
}
