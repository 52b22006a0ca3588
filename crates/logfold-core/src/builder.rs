#![forbid(unsafe_code)]

//! Event-driven construction of the build-output forest.
//!
//! [`OutputBuilder`] consumes an ordered stream of start/end events from a
//! build-output parser and grows a [`Forest`] incrementally. The "currently
//! open" node acts as an implicit stack: starting a node pushes, ending one
//! pops back to its parent through the parent link, so open/close stays O(1)
//! without a separate stack container.
//!
//! Error and warning flags are propagated to ancestors eagerly at insertion
//! time. The renderer's collapse decision is then a pure function of node
//! state, with no second pass over the tree.
//!
//! # Example
//! ```
//! use logfold_core::{NodeKind, OutputBuilder};
//!
//! let mut builder = OutputBuilder::new();
//! builder.add_node(NodeKind::Project, "App", true);
//! builder.add_node(NodeKind::Target, "Compile", true);
//! builder.add_node(NodeKind::Error, "CS1002: ; expected", false);
//! builder.end_current_node("Compile failed");
//! builder.end_current_node("Build failed");
//!
//! assert_eq!(builder.error_count(), 1);
//! let forest = builder.forest();
//! assert!(forest[forest.roots()[0]].has_errors());
//! ```

use crate::node::{Forest, Node, NodeId, NodeKind};
use crate::search::SearchIter;

/// Incremental builder for a build-output forest.
///
/// Mutating calls (`add_node`, `end_current_node`, `clear`) take `&mut self`
/// and must be serialized by the owner; shared-borrow reads (`forest`,
/// `search_nodes`) cannot race them.
#[derive(Debug, Clone)]
pub struct OutputBuilder {
    forest: Forest,
    current: Option<NodeId>,
    needs_processing: bool,
}

impl Default for OutputBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputBuilder {
    /// Create an empty builder.
    ///
    /// A fresh builder reports [`needs_processing`](Self::needs_processing)
    /// until the consumer marks it processed: nothing has been rendered yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            forest: Forest::new(),
            current: None,
            needs_processing: true,
        }
    }

    /// Append a node for one build event.
    ///
    /// With no node open the new node becomes a forest root; otherwise it is
    /// appended as the last child of the currently open node. `is_start`
    /// makes the new node the currently open one, so subsequent events nest
    /// under it until [`end_current_node`](Self::end_current_node).
    ///
    /// Inserting an [`NodeKind::Error`] or [`NodeKind::Warning`] marks the
    /// node and walks the parent chain setting the matching flag. The walk
    /// stops at the first ancestor already marked: the flags are monotonic,
    /// so everything above it is marked too.
    pub fn add_node(&mut self, kind: NodeKind, message: impl Into<String>, is_start: bool) {
        let message = message.into();
        tracing::trace!(?kind, is_start, "add build output node");

        let id = self.forest.push_node(Node::new(kind, message, self.current));
        match self.current {
            Some(parent) => self.forest.node_mut(parent).children.push(id),
            None => self.forest.push_root(id),
        }
        if is_start {
            self.current = Some(id);
        }
        match kind {
            NodeKind::Error => self.mark_error_chain(id),
            NodeKind::Warning => self.mark_warning_chain(id),
            _ => {}
        }
    }

    /// Close the currently open node.
    ///
    /// Appends `message` as a final [`NodeKind::Message`] child of the open
    /// node, then pops the open pointer back to its parent.
    ///
    /// With no node open this degenerates to appending an orphan root message
    /// node and leaving the pointer unset. Callers must not rely on that
    /// shape; it is kept for compatibility with existing event sources that
    /// emit unbalanced end events.
    pub fn end_current_node(&mut self, message: impl Into<String>) {
        self.add_node(NodeKind::Message, message, false);
        if let Some(open) = self.current {
            self.current = self.forest[open].parent();
        }
    }

    /// Discard the forest and start a new generation.
    ///
    /// Resets the open-node pointer and raises
    /// [`needs_processing`](Self::needs_processing): any previously rendered
    /// text is stale.
    pub fn clear(&mut self) {
        tracing::debug!(nodes = self.forest.len(), "clear build output forest");
        self.forest.reset();
        self.current = None;
        self.needs_processing = true;
    }

    /// The forest built so far.
    #[inline]
    #[must_use]
    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// Handle of the currently open node, if any.
    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    /// Whether the forest has changed since the consumer last processed it.
    #[inline]
    #[must_use]
    pub fn needs_processing(&self) -> bool {
        self.needs_processing
    }

    /// Lower the staleness flag after consuming the forest.
    pub fn mark_processed(&mut self) {
        self.needs_processing = false;
    }

    /// Search the whole forest for nodes of `kind`, optionally requiring an
    /// exact `message` match.
    ///
    /// Results follow root order, and within each root the depth-first
    /// children-before-self order of [`Forest::search`]. The sequence is
    /// lazy; dropping it early does no further traversal.
    pub fn search_nodes<'a>(
        &'a self,
        kind: NodeKind,
        message: Option<&'a str>,
    ) -> SearchIter<'a> {
        self.forest.search(kind, message)
    }

    /// Handle of the first error node in traversal order, if any.
    ///
    /// "First" here means the first yielded by
    /// [`search_nodes`](Self::search_nodes): deepest-leftmost, the natural
    /// jump target for a viewer.
    #[must_use]
    pub fn first_error(&self) -> Option<NodeId> {
        self.search_nodes(NodeKind::Error, None).next()
    }

    /// Number of error nodes in the forest. Computed by traversal, not cached.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.search_nodes(NodeKind::Error, None).count()
    }

    /// Number of warning nodes in the forest. Computed by traversal, not cached.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.search_nodes(NodeKind::Warning, None).count()
    }

    fn mark_error_chain(&mut self, id: NodeId) {
        let mut cursor = Some(id);
        while let Some(step) = cursor {
            let node = self.forest.node_mut(step);
            if node.has_errors {
                break;
            }
            node.has_errors = true;
            cursor = node.parent();
        }
    }

    fn mark_warning_chain(&mut self, id: NodeId) {
        let mut cursor = Some(id);
        while let Some(step) = cursor {
            let node = self.forest.node_mut(step);
            if node.has_warnings {
                break;
            }
            node.has_warnings = true;
            cursor = node.parent();
        }
    }
}
