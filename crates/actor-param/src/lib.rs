//! Parent-chain resolution for actor parameter documents.
//!
//! Asset documents are JSON objects wrapped under a `RootNode` key. A document
//! may name a parent through `$parent`; the parent's fields are merged
//! underneath the child. Resources are looked up under a local root first and
//! a shared root second.

mod actor;
mod error;
mod loader;
mod merge;
mod path;

pub use actor::{ActorRecord, ComponentSlot};
pub use error::LoadError;
pub use loader::DocumentLoader;
pub use merge::{deep_merge, merge_into, merge_layers};
pub use path::{CandidatePaths, PathResolver};

/// A parsed document payload.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Top-level key every asset file wraps its payload in.
pub const WRAPPER_KEY: &str = "RootNode";

/// Reserved key naming the document this one overrides.
pub const PARENT_KEY: &str = "$parent";

/// Bookkeeping key recording the resource path a component was loaded from.
pub const SOURCE_KEY: &str = "_file";

/// Canonical on-disk extension.
pub const CANONICAL_EXTENSION: &str = ".json";
