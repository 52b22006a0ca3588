//! Property-based invariant tests for the renderer.
//!
//! These hold for **any** forest built from an arbitrary event sequence:
//!
//! 1. Segment spans reproduce the closing node's message followed by all of
//!    its visible descendants' lines (offset arithmetic is consistent).
//! 2. Segment end offsets are non-decreasing in close order and never exceed
//!    the text length.
//! 3. Pruned diagnostics subtrees leave no text and no segments behind.
//! 4. Splicing via a base offset shifts every segment by exactly the base.
//!
//! The expectations come from an independent line-list reference renderer
//! built in this file, not from the production walk.

use logfold_core::{Forest, NodeId, NodeKind, OutputBuilder};
use logfold_render::{RenderOptions, render};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum Shape {
    Add { kind: NodeKind, is_start: bool },
    End,
}

const ALL_KINDS: [NodeKind; 8] = [
    NodeKind::Build,
    NodeKind::Project,
    NodeKind::Target,
    NodeKind::Task,
    NodeKind::Error,
    NodeKind::Warning,
    NodeKind::Message,
    NodeKind::Diagnostics,
];

fn shapes() -> impl Strategy<Value = Vec<Shape>> {
    prop::collection::vec(
        prop_oneof![
            (prop::sample::select(&ALL_KINDS[..]), any::<bool>())
                .prop_map(|(kind, is_start)| Shape::Add { kind, is_start }),
            Just(Shape::End),
        ],
        0..48,
    )
}

/// Messages are made unique per node so text containment identifies nodes.
/// The `m…e` framing keeps one message from being a substring of another.
fn build(shapes: &[Shape]) -> OutputBuilder {
    let mut builder = OutputBuilder::new();
    for (index, shape) in shapes.iter().enumerate() {
        match *shape {
            Shape::Add { kind, is_start } => {
                builder.add_node(kind, format!("m{index}e"), is_start);
            }
            Shape::End => builder.end_current_node(format!("m{index}e")),
        }
    }
    builder
}

// ── Line-list reference renderer ────────────────────────────────────────

/// One visible node: its handle, depth, and full rendered line.
struct RefLine {
    id: NodeId,
    line: String,
}

fn collect_visible(
    forest: &Forest,
    id: NodeId,
    depth: usize,
    include_diagnostics: bool,
    out: &mut Vec<RefLine>,
) {
    let node = &forest[id];
    if node.kind() == NodeKind::Diagnostics && !include_diagnostics {
        return;
    }
    let mut line = String::from("\n");
    line.extend(std::iter::repeat_n('\t', depth));
    line.push_str(node.message());
    out.push(RefLine { id, line });
    for &child in node.children() {
        collect_visible(forest, child, depth + 1, include_diagnostics, out);
    }
}

fn visible_lines(forest: &Forest, include_diagnostics: bool) -> Vec<RefLine> {
    let mut out = Vec::new();
    for &root in forest.roots() {
        collect_visible(forest, root, 0, include_diagnostics, &mut out);
    }
    out
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn is_descendant(forest: &Forest, mut id: NodeId, ancestor: NodeId) -> bool {
    while let Some(parent) = forest[id].parent() {
        if parent == ancestor {
            return true;
        }
        id = parent;
    }
    false
}

fn char_span(text: &str, start: usize, len: usize) -> String {
    text.chars().skip(start).take(len).collect()
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn segment_spans_reproduce_subtree_lines(shapes in shapes(), include in any::<bool>()) {
        let builder = build(&shapes);
        let forest = builder.forest();
        let out = render(forest, RenderOptions::new().include_diagnostics(include));
        let lines = visible_lines(forest, include);

        for segment in &out.segments {
            // Locate the closing node by its unique label.
            let position = lines
                .iter()
                .position(|l| forest[l.id].message() == segment.label)
                .expect("segment label names a visible node");
            let owner = lines[position].id;

            let mut expected = forest[owner].message().to_owned();
            for l in &lines[position + 1..] {
                if !is_descendant(forest, l.id, owner) {
                    break;
                }
                expected.push_str(&l.line);
            }
            let actual = char_span(&out.text, segment.offset, segment.length);
            prop_assert_eq!(actual, expected);
        }
    }

    #[test]
    fn text_matches_reference_lines(shapes in shapes(), include in any::<bool>()) {
        let builder = build(&shapes);
        let forest = builder.forest();
        let out = render(forest, RenderOptions::new().include_diagnostics(include));

        let expected: String = visible_lines(forest, include)
            .iter()
            .map(|l| l.line.as_str())
            .collect();
        prop_assert_eq!(out.text, expected);
    }

    #[test]
    fn segment_ends_are_monotonic_and_bounded(shapes in shapes()) {
        let builder = build(&shapes);
        let out = render(builder.forest(), RenderOptions::new());
        let total = char_len(&out.text);

        let mut last_end = 0;
        for segment in &out.segments {
            prop_assert!(segment.end() >= last_end);
            prop_assert!(segment.end() <= total);
            prop_assert!(segment.offset >= 1, "a line break precedes every node line");
            last_end = segment.end();
        }
    }

    #[test]
    fn one_segment_per_visible_non_leaf(shapes in shapes(), include in any::<bool>()) {
        let builder = build(&shapes);
        let forest = builder.forest();
        let out = render(forest, RenderOptions::new().include_diagnostics(include));

        let expected = visible_lines(forest, include)
            .iter()
            .filter(|l| !forest[l.id].is_leaf())
            .count();
        prop_assert_eq!(out.segments.len(), expected);
    }

    #[test]
    fn pruned_diagnostics_leave_no_trace(shapes in shapes()) {
        let builder = build(&shapes);
        let forest = builder.forest();
        let out = render(forest, RenderOptions::new());

        let visible: Vec<NodeId> = visible_lines(forest, false).iter().map(|l| l.id).collect();
        for &root in forest.roots() {
            prop_assert!(check_visibility(forest, root, &out.text, &visible));
        }
    }

    #[test]
    fn collapse_follows_parent_and_error_state(shapes in shapes()) {
        let builder = build(&shapes);
        let forest = builder.forest();
        let out = render(forest, RenderOptions::new());

        for segment in &out.segments {
            let id = find_by_message(forest, &segment.label).expect("label is unique");
            let node = &forest[id];
            let expected = node.parent().is_some() && !node.has_errors();
            prop_assert_eq!(segment.collapsed, expected);
        }
    }

    #[test]
    fn base_offset_is_a_pure_shift(shapes in shapes(), base in 0usize..10_000) {
        let builder = build(&shapes);
        let plain = render(builder.forest(), RenderOptions::new());
        let spliced = render(builder.forest(), RenderOptions::new().start_at_offset(base));

        prop_assert_eq!(&plain.text, &spliced.text);
        prop_assert_eq!(plain.segments.len(), spliced.segments.len());
        for (p, s) in plain.segments.iter().zip(&spliced.segments) {
            prop_assert_eq!(p.offset + base, s.offset);
            prop_assert_eq!(p.length, s.length);
            prop_assert_eq!(p.collapsed, s.collapsed);
        }
    }
}

/// Every node in the forest either shows up in the text (visible) or, being
/// under a pruned diagnostics node, leaves no trace at all. Messages are
/// unique, so containment is a node identity test.
fn check_visibility(forest: &Forest, id: NodeId, text: &str, visible: &[NodeId]) -> bool {
    let node = &forest[id];
    let in_text = text.contains(node.message());
    if in_text != visible.contains(&id) {
        return false;
    }
    node.children()
        .iter()
        .all(|&child| check_visibility(forest, child, text, visible))
}

fn find_by_message(forest: &Forest, message: &str) -> Option<NodeId> {
    fn walk(forest: &Forest, id: NodeId, message: &str) -> Option<NodeId> {
        if forest[id].message() == message {
            return Some(id);
        }
        forest[id]
            .children()
            .iter()
            .find_map(|&child| walk(forest, child, message))
    }
    forest
        .roots()
        .iter()
        .find_map(|&root| walk(forest, root, message))
}
