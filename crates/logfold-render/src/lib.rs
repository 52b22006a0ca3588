#![forbid(unsafe_code)]

//! Renderer: flat indented text plus fold segments from a build-output
//! forest.
//!
//! The consumer is a text-viewer abstraction: it receives one rendered text
//! buffer and an ordered list of [`FoldSegment`]s describing which ranges of
//! that buffer collapse, and interprets the offsets against its own buffer
//! coordinate space.

pub mod fold;
pub mod render;

pub use fold::{FoldKind, FoldSegment};
pub use render::{Rendered, RenderOptions, render};
