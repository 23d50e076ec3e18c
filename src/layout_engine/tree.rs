use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use ascii_tree::Tree;
use serde::{Deserialize, Serialize};

use super::SplitDirection;
use crate::model::WidgetType;

/// Separates the widget type from the unique suffix in a pane identity.
pub const IDENTITY_DELIMITER: char = '#';

/// Identity of one pane, conventionally `widgetType#suffix`.
///
/// Preset templates use bare widget-type names (no suffix) as leaf values, so
/// a `PaneId` without a delimiter is valid too.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct PaneId(String);

impl PaneId {
    pub fn new(raw: impl Into<String>) -> Self { Self(raw.into()) }

    pub fn as_str(&self) -> &str { &self.0 }

    /// The part of the identity before the delimiter.
    pub fn widget_name(&self) -> &str {
        self.0.split_once(IDENTITY_DELIMITER).map_or(self.0.as_str(), |(name, _)| name)
    }

    pub fn suffix(&self) -> Option<&str> {
        self.0.split_once(IDENTITY_DELIMITER).map(|(_, suffix)| suffix)
    }

    pub fn widget_type(&self) -> WidgetType { WidgetType::from_name(self.widget_name()) }
}

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl Borrow<str> for PaneId {
    fn borrow(&self) -> &str { &self.0 }
}

impl From<&str> for PaneId {
    fn from(raw: &str) -> Self { Self::new(raw) }
}

impl From<String> for PaneId {
    fn from(raw: String) -> Self { Self(raw) }
}

/// A node of the layout tree.
///
/// On the wire a leaf is a bare string and a branch is an object with
/// `direction`, `first`, `second` and an optional `splitPercentage`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum LayoutNode {
    Leaf(PaneId),
    Branch(Branch),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub direction: SplitDirection,
    pub first: Arc<LayoutNode>,
    pub second: Arc<LayoutNode>,
    /// Share of the space given to `first`, in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_percentage: Option<f64>,
}

/// `None` is an empty dashboard.
pub type LayoutTree = Option<LayoutNode>;

impl Branch {
    pub fn new(direction: SplitDirection, first: LayoutNode, second: LayoutNode) -> Self {
        Self {
            direction,
            first: Arc::new(first),
            second: Arc::new(second),
            split_percentage: None,
        }
    }

    /// Same split with a different `first` child; `second` is shared.
    pub fn with_first(&self, first: LayoutNode) -> Self {
        Self {
            direction: self.direction,
            first: Arc::new(first),
            second: Arc::clone(&self.second),
            split_percentage: self.split_percentage,
        }
    }
}

impl LayoutNode {
    pub fn leaf(id: impl Into<PaneId>) -> Self { Self::Leaf(id.into()) }

    pub fn branch(direction: SplitDirection, first: LayoutNode, second: LayoutNode) -> Self {
        Self::Branch(Branch::new(direction, first, second))
    }

    /// Sets the split percentage of a branch. Leaves are returned untouched.
    pub fn with_split(self, percentage: f64) -> Self {
        match self {
            Self::Branch(branch) => Self::Branch(Branch {
                split_percentage: Some(percentage),
                ..branch
            }),
            leaf @ Self::Leaf(_) => leaf,
        }
    }

    /// Leaf identities in pre-order (`first` before `second`).
    pub fn leaves(&self) -> Leaves<'_> { Leaves { stack: vec![self] } }

    pub fn count_leaves(&self) -> usize { self.leaves().count() }

    pub fn contains(&self, id: &PaneId) -> bool { self.leaves().any(|leaf| leaf == id) }

    /// Renders the tree as indented ASCII art for logs and the CLI.
    pub fn draw_tree(&self) -> String {
        let mut out = String::new();
        // Writing into a String never fails.
        let _ = ascii_tree::write_tree(&mut out, &self.to_ascii_tree());
        out
    }

    fn to_ascii_tree(&self) -> Tree {
        match self {
            Self::Leaf(id) => Tree::Leaf(vec![id.to_string()]),
            Self::Branch(branch) => {
                let label = match branch.split_percentage {
                    Some(percentage) => format!("{} {percentage}%", branch.direction),
                    None => branch.direction.to_string(),
                };
                Tree::Node(
                    label,
                    vec![branch.first.to_ascii_tree(), branch.second.to_ascii_tree()],
                )
            }
        }
    }
}

pub fn count_leaves(tree: &LayoutTree) -> usize {
    tree.as_ref().map_or(0, LayoutNode::count_leaves)
}

pub struct Leaves<'a> {
    stack: Vec<&'a LayoutNode>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a PaneId;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                LayoutNode::Leaf(id) => return Some(id),
                LayoutNode::Branch(branch) => {
                    self.stack.push(&branch.second);
                    self.stack.push(&branch.first);
                }
            }
        }
        None
    }
}
