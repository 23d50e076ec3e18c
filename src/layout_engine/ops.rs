//! Pure tree transforms. Each takes the current tree by reference and returns
//! the next revision; subtrees that are not on the edited path are shared with
//! the input through their `Arc`s.

use std::sync::Arc;

use super::{Branch, IdentityGenerator, LayoutNode, LayoutTree, PaneId, SplitDirection};

/// Adds a pane next to the top-left-most pane (reached by following `first`).
pub fn insert_first_leaf(
    tree: &LayoutTree,
    widget_type: &str,
    ids: &mut IdentityGenerator,
) -> LayoutTree {
    let new_leaf = LayoutNode::Leaf(ids.new_identity(widget_type));
    match tree {
        None => Some(new_leaf),
        Some(root) => Some(split_first_leaf(root, new_leaf)),
    }
}

fn split_first_leaf(node: &LayoutNode, new_leaf: LayoutNode) -> LayoutNode {
    match node {
        LayoutNode::Leaf(_) => LayoutNode::branch(SplitDirection::Row, node.clone(), new_leaf),
        LayoutNode::Branch(branch) => {
            LayoutNode::Branch(branch.with_first(split_first_leaf(&branch.first, new_leaf)))
        }
    }
}

/// Splits the pane `target`, putting a new pane of `widget_type` second.
///
/// Returns the tree unchanged when `target` is not in it.
pub fn insert_at_leaf(
    tree: &LayoutTree,
    target: &PaneId,
    widget_type: &str,
    direction: SplitDirection,
    ids: &mut IdentityGenerator,
) -> LayoutTree {
    let Some(root) = tree.as_ref().filter(|root| root.contains(target)) else {
        return tree.clone();
    };
    let new_id = ids.new_identity(widget_type);
    let split = split_matching(root, target, direction, &new_id);
    Some(split.unwrap_or_else(|| root.clone()))
}

/// `None` means the subtree holds no match and can be shared as-is.
fn split_matching(
    node: &LayoutNode,
    target: &PaneId,
    direction: SplitDirection,
    new_id: &PaneId,
) -> Option<LayoutNode> {
    match node {
        LayoutNode::Leaf(id) if id == target => Some(LayoutNode::branch(
            direction,
            node.clone(),
            LayoutNode::Leaf(new_id.clone()),
        )),
        LayoutNode::Leaf(_) => None,
        LayoutNode::Branch(branch) => {
            let first = split_matching(&branch.first, target, direction, new_id);
            let second = split_matching(&branch.second, target, direction, new_id);
            if first.is_none() && second.is_none() {
                return None;
            }
            Some(LayoutNode::Branch(Branch {
                direction: branch.direction,
                first: first.map_or_else(|| Arc::clone(&branch.first), Arc::new),
                second: second.map_or_else(|| Arc::clone(&branch.second), Arc::new),
                split_percentage: branch.split_percentage,
            }))
        }
    }
}

/// Removes the pane `identity`, collapsing any branch left with one child.
pub fn remove_leaf(tree: &LayoutTree, identity: &PaneId) -> LayoutTree {
    let root = tree.as_ref()?;
    match prune(root, identity) {
        Pruned::Kept => Some(root.clone()),
        Pruned::Gone => None,
        Pruned::Replaced(node) => Some(node),
    }
}

enum Pruned {
    Kept,
    Gone,
    Replaced(LayoutNode),
}

fn prune(node: &LayoutNode, identity: &PaneId) -> Pruned {
    match node {
        LayoutNode::Leaf(id) if id == identity => Pruned::Gone,
        LayoutNode::Leaf(_) => Pruned::Kept,
        LayoutNode::Branch(branch) => {
            let first = prune(&branch.first, identity);
            let second = prune(&branch.second, identity);
            if matches!((&first, &second), (Pruned::Kept, Pruned::Kept)) {
                return Pruned::Kept;
            }
            match (survivor(first, &branch.first), survivor(second, &branch.second)) {
                (None, None) => Pruned::Gone,
                (Some(only), None) | (None, Some(only)) => {
                    Pruned::Replaced(Arc::unwrap_or_clone(only))
                }
                (Some(first), Some(second)) => Pruned::Replaced(LayoutNode::Branch(Branch {
                    direction: branch.direction,
                    first,
                    second,
                    split_percentage: branch.split_percentage,
                })),
            }
        }
    }
}

fn survivor(pruned: Pruned, original: &Arc<LayoutNode>) -> Option<Arc<LayoutNode>> {
    match pruned {
        Pruned::Kept => Some(Arc::clone(original)),
        Pruned::Gone => None,
        Pruned::Replaced(node) => Some(Arc::new(node)),
    }
}

/// Rebuilds a template whose leaves are bare widget types, giving every leaf
/// a fresh identity. Directions and split percentages are kept.
pub fn instantiate_preset(template: &LayoutTree, ids: &mut IdentityGenerator) -> LayoutTree {
    template.as_ref().map(|root| instantiate(root, ids))
}

fn instantiate(node: &LayoutNode, ids: &mut IdentityGenerator) -> LayoutNode {
    match node {
        LayoutNode::Leaf(widget) => LayoutNode::Leaf(ids.new_identity(widget.as_str())),
        LayoutNode::Branch(branch) => LayoutNode::Branch(Branch {
            direction: branch.direction,
            first: Arc::new(instantiate(&branch.first, ids)),
            second: Arc::new(instantiate(&branch.second, ids)),
            split_percentage: branch.split_percentage,
        }),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::layout_engine::count_leaves;
    use crate::layout_engine::validate::has_unique_identities;

    fn ids() -> IdentityGenerator { IdentityGenerator::sequential() }

    fn leaf(id: &str) -> LayoutNode { LayoutNode::leaf(id) }

    fn row(first: LayoutNode, second: LayoutNode) -> LayoutNode {
        LayoutNode::branch(SplitDirection::Row, first, second)
    }

    fn column(first: LayoutNode, second: LayoutNode) -> LayoutNode {
        LayoutNode::branch(SplitDirection::Column, first, second)
    }

    fn four_panes() -> LayoutTree {
        Some(
            column(
                row(leaf("agentMap#a"), leaf("globalMetrics#b")).with_split(70.0),
                row(leaf("eventLog#c"), leaf("metrics#d")).with_split(50.0),
            )
            .with_split(60.0),
        )
    }

    #[test]
    fn insert_into_empty_tree_gives_a_bare_leaf() {
        let tree = insert_first_leaf(&None, "agentMap", &mut ids());
        assert_eq!(tree, Some(leaf("agentMap#000001")));
    }

    #[test]
    fn insert_first_leaf_splits_top_left_pane() {
        let tree = four_panes();
        let next = insert_first_leaf(&tree, "eventLog", &mut ids());

        let expected = Some(
            column(
                row(row(leaf("agentMap#a"), leaf("eventLog#000001")), leaf("globalMetrics#b"))
                    .with_split(70.0),
                row(leaf("eventLog#c"), leaf("metrics#d")).with_split(50.0),
            )
            .with_split(60.0),
        );
        assert_eq!(next, expected);
    }

    #[test]
    fn insert_first_leaf_shares_untouched_subtrees() {
        let tree = four_panes();
        let next = insert_first_leaf(&tree, "eventLog", &mut ids());
        let (Some(LayoutNode::Branch(before)), Some(LayoutNode::Branch(after))) = (&tree, &next)
        else {
            panic!("expected branch roots");
        };
        assert!(Arc::ptr_eq(&before.second, &after.second));
        assert!(!Arc::ptr_eq(&before.first, &after.first));
    }

    #[test]
    fn insert_first_leaf_adds_exactly_one_leaf() {
        let mut ids = ids();
        let mut tree = None;
        for expected in 1..=6 {
            tree = insert_first_leaf(&tree, "metrics", &mut ids);
            assert_eq!(count_leaves(&tree), expected);
            assert!(has_unique_identities(&tree));
        }
    }

    #[test]
    fn insert_at_leaf_splits_only_the_target() {
        let tree = four_panes();
        let target = PaneId::new("metrics#d");
        let next = insert_at_leaf(&tree, &target, "agentMap", SplitDirection::Column, &mut ids());

        let expected = Some(
            column(
                row(leaf("agentMap#a"), leaf("globalMetrics#b")).with_split(70.0),
                row(leaf("eventLog#c"), column(leaf("metrics#d"), leaf("agentMap#000001")))
                    .with_split(50.0),
            )
            .with_split(60.0),
        );
        assert_eq!(next, expected);
        assert!(has_unique_identities(&next));

        let (Some(LayoutNode::Branch(before)), Some(LayoutNode::Branch(after))) = (&tree, &next)
        else {
            panic!("expected branch roots");
        };
        assert!(Arc::ptr_eq(&before.first, &after.first));
    }

    #[test]
    fn insert_at_missing_leaf_is_a_no_op() {
        let mut ids = ids();
        let missing = PaneId::new("doesNotExist#9");
        for tree in [None, Some(leaf("a#1")), four_panes()] {
            let next = insert_at_leaf(&tree, &missing, "agentMap", SplitDirection::Row, &mut ids);
            assert_eq!(next, tree);
        }
        // No identity was spent on the no-ops.
        assert_eq!(ids.new_identity("x"), PaneId::new("x#000001"));
    }

    #[test]
    fn remove_collapses_branch_to_sibling() {
        let tree = Some(row(leaf("a#1"), leaf("b#2")));
        assert_eq!(remove_leaf(&tree, &PaneId::new("a#1")), Some(leaf("b#2")));
        assert_eq!(remove_leaf(&tree, &PaneId::new("b#2")), Some(leaf("a#1")));
    }

    #[test]
    fn remove_last_leaf_empties_the_tree() {
        let tree = Some(leaf("only#1"));
        assert_eq!(remove_leaf(&tree, &PaneId::new("only#1")), None);
        assert_eq!(remove_leaf(&None, &PaneId::new("only#1")), None);
    }

    #[test]
    fn remove_promotes_surviving_subtree_and_keeps_other_splits() {
        let tree = four_panes();
        let next = remove_leaf(&tree, &PaneId::new("globalMetrics#b"));
        let expected = Some(
            column(leaf("agentMap#a"), row(leaf("eventLog#c"), leaf("metrics#d")).with_split(50.0))
                .with_split(60.0),
        );
        assert_eq!(next, expected);

        let next = remove_leaf(&next, &PaneId::new("agentMap#a"));
        assert_eq!(next, Some(row(leaf("eventLog#c"), leaf("metrics#d")).with_split(50.0)));
    }

    #[test]
    fn remove_every_leaf_one_by_one_never_leaves_empty_branches() {
        let mut tree = four_panes();
        for id in ["metrics#d", "agentMap#a", "eventLog#c"] {
            tree = remove_leaf(&tree, &PaneId::new(id));
            assert!(tree.is_some());
        }
        assert_eq!(tree, Some(leaf("globalMetrics#b")));
        assert_eq!(remove_leaf(&tree, &PaneId::new("globalMetrics#b")), None);
    }

    #[test]
    fn remove_missing_leaf_is_a_no_op() {
        let tree = four_panes();
        assert_eq!(remove_leaf(&tree, &PaneId::new("nope#0")), tree);
    }

    #[test]
    fn instantiate_gives_repeated_types_distinct_identities() {
        let template = Some(row(leaf("agentMap"), leaf("agentMap")));
        let tree = instantiate_preset(&template, &mut IdentityGenerator::random());

        assert!(has_unique_identities(&tree));
        let root = tree.as_ref().unwrap();
        let leaves: Vec<_> = root.leaves().collect();
        assert_eq!(leaves.len(), 2);
        assert_ne!(leaves[0], leaves[1]);
        assert!(leaves.iter().all(|id| id.as_str().starts_with("agentMap#")));
    }

    #[test]
    fn instantiate_keeps_structure() {
        let template = Some(
            column(row(leaf("agentMap"), leaf("eventLog")).with_split(70.0), leaf("metrics"))
                .with_split(65.0),
        );
        let tree = instantiate_preset(&template, &mut ids());
        let expected = Some(
            column(
                row(leaf("agentMap#000001"), leaf("eventLog#000002")).with_split(70.0),
                leaf("metrics#000003"),
            )
            .with_split(65.0),
        );
        assert_eq!(tree, expected);
        assert_eq!(instantiate_preset(&None, &mut ids()), None);
    }
}
