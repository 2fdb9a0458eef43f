//! Stub trees: the declaration skeleton of a Java file.
//!
//! A stub tree records what indexing and member queries need (names,
//! modifiers, type texts, reference lists) without statement bodies. It is
//! built from any [`jpsi_tree::LighterAst`] and can be written to and read
//! back from a compact binary form.
//!
//! - [`build_stub_tree`]: the builder, over parser output or a syntax tree
//! - [`visit_stub_nodes`]: the traversal the builder shares with the PSI
//!   layer's stub-to-tree binding
//! - [`is_stub_free`]: whether a body can stay out of the stub tree
//! - [`extract`]: the facts stubs record, read off a tree
//! - [`serialize_stub_tree`] / [`deserialize_stub_tree`]: persistence

mod builder;
mod classifier;
pub mod extract;
mod flags;
mod serialize;
mod stub;
mod traverse;

pub use builder::{build_stub_tree, StubBuildOptions};
pub use classifier::{is_stub_free, is_stub_free_text, is_stub_free_tree, BodyScanner, ScanStep};
pub use flags::StubFlags;
pub use serialize::{
    deserialize_stub_tree, serialize_stub_tree, StubSerializationError, FORMAT_VERSION, MAGIC,
};
pub use stub::{StubId, StubNode, StubTree, INITIALIZER_TOO_LONG};
pub use traverse::{creates_stub, skip_child, visit_stub_nodes, StubVisitor};
