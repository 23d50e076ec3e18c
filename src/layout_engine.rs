//! The layout-tree engine.
//!
//! A dashboard layout is a binary tree of split panes. Every revision of the
//! tree is an immutable value: operations in [`ops`] take the previous tree
//! and return a new one, and [`LayoutStore`] swaps the current tree for the
//! new one once it passes validation.

mod identity;
pub mod ops;
mod presets;
mod store;
mod tree;
pub mod validate;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

pub use identity::{IdentityGenerator, RandomTokens, SequenceTokens, TokenSource};
pub use presets::Preset;
pub use store::{BootstrapOutcome, LayoutCommand, LayoutStore, SNAPSHOT_KEY};
pub use tree::{Branch, IDENTITY_DELIMITER, LayoutNode, LayoutTree, Leaves, PaneId, count_leaves};

/// Axis along which a branch divides its space between `first` and `second`.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SplitDirection {
    /// Side by side.
    #[default]
    Row,
    /// Stacked.
    Column,
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("layout snapshot is not valid JSON")]
    Parse(#[source] serde_json::Error),
    #[error("layout snapshot is not a well-formed tree")]
    Malformed,
    #[error("layout snapshot could not be decoded into a tree")]
    Decode(#[source] serde_json::Error),
    #[error("layout contains duplicate pane identities: {0:?}")]
    DuplicateIdentities(Vec<PaneId>),
}
