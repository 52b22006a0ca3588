#![forbid(unsafe_code)]

//! Forest-to-text rendering.
//!
//! Walks the forest pre-order, emitting one line per node: a line break,
//! one tab per nesting depth, then the message verbatim (no escaping — the
//! consuming viewer escapes if it needs to). As each non-leaf node closes,
//! one fold segment is recorded spanning from the start of its message to the
//! end of its last descendant's line, so segments arrive bottom-up, child
//! before parent.
//!
//! Collapse state is a pure function of already-computed node flags: roots
//! and error-bearing nodes stay expanded, every other non-leaf collapses by
//! default. That is why the builder propagates error flags at insertion time
//! rather than leaving them to a render-time pass.
//!
//! # Example
//! ```
//! use logfold_core::{NodeKind, OutputBuilder};
//! use logfold_render::{RenderOptions, render};
//!
//! let mut builder = OutputBuilder::new();
//! builder.add_node(NodeKind::Project, "App", true);
//! builder.add_node(NodeKind::Message, "Compiling main.rs", false);
//! builder.end_current_node("Build succeeded");
//!
//! let rendered = render(builder.forest(), RenderOptions::new());
//! assert_eq!(rendered.text, "\nApp\n\tCompiling main.rs\n\tBuild succeeded");
//! assert_eq!(rendered.segments.len(), 1);
//! ```

use crate::fold::{FoldKind, FoldSegment};
use logfold_core::{Forest, NodeId, NodeKind};

/// Options for one render pass.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    include_diagnostics: bool,
    start_at_offset: usize,
}

impl RenderOptions {
    /// Default options: diagnostics pruned, offsets starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            include_diagnostics: false,
            start_at_offset: 0,
        }
    }

    /// Include [`NodeKind::Diagnostics`] subtrees in the output.
    ///
    /// When false (the default) a diagnostics node prunes its whole subtree:
    /// no text, no segments, children never visited.
    #[must_use]
    pub fn include_diagnostics(mut self, include: bool) -> Self {
        self.include_diagnostics = include;
        self
    }

    /// Base char offset of the output within the consumer's buffer.
    ///
    /// Lets the rendered block be spliced after existing content without the
    /// viewer recomputing every segment offset.
    #[must_use]
    pub fn start_at_offset(mut self, offset: usize) -> Self {
        self.start_at_offset = offset;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Output of [`render`]: the flat text and its fold segments.
///
/// Segment offsets are char-counted and absolute (they include the
/// configured splice base). Segment end offsets are non-decreasing in list
/// order, since each segment closes at the then-current end of the text.
#[derive(Debug, Clone, Default)]
pub struct Rendered {
    /// The rendered text. Every node line starts with `'\n'`, so output
    /// spliced after existing content never runs into it.
    pub text: String,
    /// Fold segments in close order: a child's segment precedes its parent's.
    pub segments: Vec<FoldSegment>,
}

/// Render a forest into indented text plus fold segments.
pub fn render(forest: &Forest, options: RenderOptions) -> Rendered {
    let mut walk = Walk {
        forest,
        include_diagnostics: options.include_diagnostics,
        base: options.start_at_offset,
        text: String::new(),
        chars: 0,
        segments: Vec::new(),
    };
    for &root in forest.roots() {
        walk.emit(root, 0);
    }
    tracing::debug!(
        nodes = forest.len(),
        chars = walk.chars,
        segments = walk.segments.len(),
        "rendered build output"
    );
    Rendered {
        text: walk.text,
        segments: walk.segments,
    }
}

struct Walk<'a> {
    forest: &'a Forest,
    include_diagnostics: bool,
    base: usize,
    text: String,
    /// Chars emitted so far. Tracked separately because segment offsets are
    /// char-counted while `String::len` is bytes.
    chars: usize,
    segments: Vec<FoldSegment>,
}

impl Walk<'_> {
    fn emit(&mut self, id: NodeId, depth: usize) {
        let node = &self.forest[id];
        if node.kind() == NodeKind::Diagnostics && !self.include_diagnostics {
            return;
        }

        self.push_char('\n');
        for _ in 0..depth {
            self.push_char('\t');
        }
        let start = self.base + self.chars;
        self.push_str(node.message());

        for &child in node.children() {
            self.emit(child, depth + 1);
        }

        if !node.is_leaf() {
            let end = self.base + self.chars;
            self.segments.push(FoldSegment {
                offset: start,
                length: end - start,
                collapsed: node.parent().is_some() && !node.has_errors(),
                label: node.message().to_owned(),
                kind: FoldKind::Region,
            });
        }
    }

    fn push_char(&mut self, c: char) {
        self.text.push(c);
        self.chars += 1;
    }

    fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
        self.chars += s.chars().count();
    }
}
