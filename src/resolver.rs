//! Owning-ancestor resolution
//!
//! A constraint must be registered on a node that contains every element it
//! references. This is the nearest common ancestor of subject and target,
//! or the subject's parent when there is no element target.

use crate::error::ConstraintError;
use crate::spec::Anchor;
use crate::tree::{ElementId, TreeAccess};

/// Find the node a constraint between `subject` and `target` belongs on
///
/// - no target: the subject's parent
/// - element target: the first node on the subject's parent chain (starting
///   at the subject itself) that contains the target
/// - guide target: the subject's parent, which the guide is scoped to
///
/// Never cached: the answer is computed from the tree as it is now.
pub fn find_owning_ancestor<T: TreeAccess + ?Sized>(
    tree: &T,
    subject: ElementId,
    target: Option<Anchor>,
) -> Result<ElementId, ConstraintError> {
    match target {
        Some(Anchor::Element(other)) => common_ancestor(tree, subject, other).ok_or(
            ConstraintError::NoCommonAncestor {
                element: subject,
                target: Anchor::Element(other),
            },
        ),
        None | Some(Anchor::Guide(_)) => tree
            .parent(subject)
            .ok_or(ConstraintError::NoSuperview { element: subject }),
    }
}

/// Nearest node containing both `a` and `b`, inclusive of `a` itself
pub fn common_ancestor<T: TreeAccess + ?Sized>(
    tree: &T,
    a: ElementId,
    b: ElementId,
) -> Option<ElementId> {
    std::iter::successors(Some(a), |node| tree.parent(*node))
        .find(|candidate| tree.is_descendant(b, *candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::GuideId;
    use crate::tree::ElementTree;

    #[test]
    fn test_self_is_own_owner() {
        let mut tree = ElementTree::new();
        let root = tree.add_root("root");
        let a = tree.add_child(root, "a");
        assert_eq!(
            find_owning_ancestor(&tree, a, Some(Anchor::Element(a))),
            Ok(a)
        );
        // A lone root is still its own common ancestor
        assert_eq!(
            find_owning_ancestor(&tree, root, Some(Anchor::Element(root))),
            Ok(root)
        );
    }

    #[test]
    fn test_no_target_uses_parent() {
        let mut tree = ElementTree::new();
        let root = tree.add_root("root");
        let a = tree.add_child(root, "a");
        assert_eq!(find_owning_ancestor(&tree, a, None), Ok(root));
        assert_eq!(
            find_owning_ancestor(&tree, root, None),
            Err(ConstraintError::NoSuperview { element: root })
        );
    }

    #[test]
    fn test_guide_uses_parent() {
        let mut tree = ElementTree::new();
        let root = tree.add_root("root");
        let a = tree.add_child(root, "a");
        let b = tree.add_child(a, "b");
        let guide = Some(Anchor::Guide(GuideId(1)));
        assert_eq!(find_owning_ancestor(&tree, b, guide), Ok(a));
        assert_eq!(
            find_owning_ancestor(&tree, root, guide),
            Err(ConstraintError::NoSuperview { element: root })
        );
    }

    #[test]
    fn test_ancestor_target_is_owner() {
        let mut tree = ElementTree::new();
        let root = tree.add_root("root");
        let a = tree.add_child(root, "a");
        let b = tree.add_child(a, "b");
        assert_eq!(common_ancestor(&tree, b, root), Some(root));
        assert_eq!(common_ancestor(&tree, root, b), Some(root));
        assert_eq!(common_ancestor(&tree, b, a), Some(a));
    }

    #[test]
    fn test_disjoint_trees() {
        let mut tree = ElementTree::new();
        let left = tree.add_root("left");
        let right = tree.add_root("right");
        let a = tree.add_child(left, "a");
        assert_eq!(
            find_owning_ancestor(&tree, a, Some(Anchor::Element(right))),
            Err(ConstraintError::NoCommonAncestor {
                element: a,
                target: Anchor::Element(right),
            })
        );
    }
}
