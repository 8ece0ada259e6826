//! Element hierarchy
//!
//! The constraint core only reads the hierarchy: a parent link per element
//! and a descendant test. [`TreeAccess`] is that read-only view; [`ElementTree`]
//! is an arena-backed implementation where parents own their children and the
//! parent link is a plain index, never a second owner.

use std::fmt;

use indextree::{Arena, NodeId};

/// Handle to an element in a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(NodeId);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Read-only access to a view hierarchy
pub trait TreeAccess {
    /// Direct parent of `element`, if it has one
    fn parent(&self, element: ElementId) -> Option<ElementId>;

    /// True if `element` is `ancestor` or lies somewhere beneath it
    fn is_descendant(&self, element: ElementId, ancestor: ElementId) -> bool {
        let mut current = Some(element);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Human-readable name used in diagnostics
    fn label(&self, element: ElementId) -> String {
        element.to_string()
    }
}

#[derive(Debug, Clone)]
struct ElementData {
    name: String,
}

/// An owned element hierarchy
#[derive(Debug, Default)]
pub struct ElementTree {
    arena: Arena<ElementData>,
}

impl ElementTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parentless element
    pub fn add_root(&mut self, name: impl Into<String>) -> ElementId {
        ElementId(self.arena.new_node(ElementData { name: name.into() }))
    }

    /// Create an element as the last child of `parent`
    pub fn add_child(&mut self, parent: ElementId, name: impl Into<String>) -> ElementId {
        let child = self.arena.new_node(ElementData { name: name.into() });
        parent.0.append(child, &mut self.arena);
        ElementId(child)
    }

    /// Remove `element` (with its subtree) from its parent; it becomes a root
    pub fn detach(&mut self, element: ElementId) {
        element.0.detach(&mut self.arena);
    }

    pub fn name(&self, element: ElementId) -> Option<&str> {
        self.arena
            .get(element.0)
            .map(|node| node.get().name.as_str())
    }

    /// Children of `element` in insertion order
    pub fn children(&self, element: ElementId) -> Vec<ElementId> {
        element.0.children(&self.arena).map(ElementId).collect()
    }

    pub fn len(&self) -> usize {
        self.arena.count()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }
}

impl TreeAccess for ElementTree {
    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.arena.get(element.0)?.parent().map(ElementId)
    }

    fn is_descendant(&self, element: ElementId, ancestor: ElementId) -> bool {
        element.0.ancestors(&self.arena).any(|node| node == ancestor.0)
    }

    fn label(&self, element: ElementId) -> String {
        match self.name(element) {
            Some(name) => name.to_string(),
            None => element.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (ElementTree, ElementId, ElementId, ElementId) {
        let mut tree = ElementTree::new();
        let root = tree.add_root("root");
        let panel = tree.add_child(root, "panel");
        let button = tree.add_child(panel, "button");
        (tree, root, panel, button)
    }

    #[test]
    fn test_parent_links() {
        let (tree, root, panel, button) = sample();
        assert_eq!(tree.parent(button), Some(panel));
        assert_eq!(tree.parent(panel), Some(root));
        assert_eq!(tree.parent(root), None);
    }

    #[test]
    fn test_is_descendant_includes_self() {
        let (tree, root, panel, button) = sample();
        assert!(tree.is_descendant(button, root));
        assert!(tree.is_descendant(panel, panel));
        assert!(!tree.is_descendant(root, button));
    }

    #[test]
    fn test_detach_makes_root() {
        let (mut tree, root, panel, button) = sample();
        tree.detach(panel);
        assert_eq!(tree.parent(panel), None);
        assert_eq!(tree.parent(button), Some(panel));
        assert!(!tree.is_descendant(button, root));
        assert!(tree.children(root).is_empty());
    }

    #[test]
    fn test_names_and_label() {
        let (tree, _, panel, _) = sample();
        assert_eq!(tree.name(panel), Some("panel"));
        assert_eq!(tree.label(panel), "panel");
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_default_descendant_walk() {
        // Exercise the trait's provided walk through a minimal accessor
        struct Chain(Vec<Option<ElementId>>, Vec<ElementId>);
        impl TreeAccess for Chain {
            fn parent(&self, element: ElementId) -> Option<ElementId> {
                let idx = self.1.iter().position(|e| *e == element)?;
                self.0[idx]
            }
        }

        let (_, root, panel, button) = sample();
        let chain = Chain(vec![None, Some(root), Some(panel)], vec![root, panel, button]);
        assert!(chain.is_descendant(button, root));
        assert!(!chain.is_descendant(root, panel));
    }
}
