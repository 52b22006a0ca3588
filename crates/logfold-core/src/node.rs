#![forbid(unsafe_code)]

//! Build-output tree data model.
//!
//! A build session is a forest of [`Node`]s stored in a [`Forest`] arena.
//! Nodes refer to each other through compact [`NodeId`] handles: the arena
//! owns all node storage, parent→child edges form the tree topology, and the
//! child→parent link is a plain back-reference for navigation. Handles never
//! dangle within one forest generation; [`Forest::clear`] starts a new one.
//!
//! # Example
//! ```
//! use logfold_core::{NodeKind, OutputBuilder};
//!
//! let mut builder = OutputBuilder::new();
//! builder.add_node(NodeKind::Project, "MyApp.csproj", true);
//! builder.add_node(NodeKind::Message, "Restoring packages", false);
//! builder.end_current_node("Build succeeded");
//!
//! let forest = builder.forest();
//! let root = &forest[forest.roots()[0]];
//! assert_eq!(root.kind(), NodeKind::Project);
//! assert_eq!(root.children().len(), 2);
//! ```

use smallvec::SmallVec;
use std::ops::Index;

/// Classification of a build-output node.
///
/// Closed set: the event source maps every raw event onto one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Whole-build envelope.
    Build,
    /// A project within the build.
    Project,
    /// A target within a project.
    Target,
    /// A task executed by a target.
    Task,
    /// A build error. Insertion marks the node and every ancestor as
    /// error-bearing.
    Error,
    /// A build warning. Insertion marks the node and every ancestor as
    /// warning-bearing.
    Warning,
    /// Free-form output text.
    Message,
    /// Verbose diagnostic detail; prunable from rendered output.
    Diagnostics,
}

/// Compact handle to a node inside a [`Forest`].
///
/// Ids are only meaningful against the forest that produced them. Indexing a
/// forest with a handle from a previous generation (before a `clear`) or from
/// another forest is a logic error and panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize);
        Self(index as u32)
    }

    /// Position of the node in the arena.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single entry in the build-output hierarchy.
///
/// The message payload is opaque: the core never parses it, and the renderer
/// emits it verbatim.
#[derive(Debug, Clone)]
pub struct Node {
    kind: NodeKind,
    message: String,
    parent: Option<NodeId>,
    /// Child handles in event-arrival order (crate-visible for the builder).
    pub(crate) children: SmallVec<[NodeId; 4]>,
    /// Monotonic error flag (crate-visible for the builder's ancestor walk).
    pub(crate) has_errors: bool,
    /// Monotonic warning flag (crate-visible for the builder's ancestor walk).
    pub(crate) has_warnings: bool,
}

impl Node {
    pub(crate) fn new(kind: NodeKind, message: String, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            message,
            parent,
            children: SmallVec::new(),
            has_errors: false,
            has_warnings: false,
        }
    }

    /// The node's kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// The raw message payload. May be empty.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Handle of the parent node, `None` for roots.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child handles in event-arrival order. Append-only, never reordered.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether this node has no children.
    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// True if this node is, or contains, an [`NodeKind::Error`] node.
    ///
    /// Monotonic: once set it stays set for the node's lifetime.
    #[inline]
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// True if this node is, or contains, a [`NodeKind::Warning`] node.
    ///
    /// Monotonic: once set it stays set for the node's lifetime.
    #[inline]
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.has_warnings
    }
}

/// Arena storage for a build-output forest.
///
/// Owns every node and the ordered list of roots. Append-only between
/// [`Forest::clear`] calls; nodes are never removed individually.
#[derive(Debug, Clone, Default)]
pub struct Forest {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl Forest {
    /// Create an empty forest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of nodes in the forest.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the forest holds no nodes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Root handles in event-arrival order.
    #[inline]
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Look up a node, `None` if the handle is out of range.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub(crate) fn push_node(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub(crate) fn push_root(&mut self, id: NodeId) {
        self.roots.push(id);
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub(crate) fn reset(&mut self) {
        self.nodes.clear();
        self.roots.clear();
    }
}

impl Index<NodeId> for Forest {
    type Output = Node;

    /// Panics if the handle does not belong to this forest generation.
    #[inline]
    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}
