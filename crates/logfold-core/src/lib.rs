#![forbid(unsafe_code)]

//! Core: build-output tree model, event-driven construction, search, and
//! capture-file lifecycle.

pub mod builder;
pub mod capture;
pub mod node;
pub mod search;

pub use builder::OutputBuilder;
pub use capture::CaptureFile;
pub use node::{Forest, Node, NodeId, NodeKind};
pub use search::SearchIter;
