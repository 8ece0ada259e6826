//! pinlayout - a constraint builder over declarative layout hosts
//!
//! High-level layout intents ("pin the bottom edge 12 points in", "place
//! below that label", "fill the row with these buttons") are turned into
//! primitive linear constraints of the form
//! `item.attribute REL multiplier * other.attribute + constant`, each
//! registered on the nearest common ancestor of the elements it mentions.
//! The crate never solves anything itself: constraints go to a
//! [`ConstraintSink`] supplied by the caller.
//!
//! # Example
//!
//! ```rust
//! use pinlayout::{Axis, ElementTree, Layout, RecordingSink};
//!
//! let mut tree = ElementTree::new();
//! let toolbar = tree.add_root("toolbar");
//! let buttons: Vec<_> = ["back", "title", "done"]
//!     .into_iter()
//!     .map(|name| tree.add_child(toolbar, name))
//!     .collect();
//!
//! let mut sink = RecordingSink::new();
//! let batch = Layout::new(&tree, &mut sink).fill(&buttons, Axis::Horizontal, Some(8.0), None);
//!
//! assert!(batch.is_complete());
//! assert_eq!(sink.constraints_on(toolbar).len(), 6);
//! ```
//!
//! Every call borrows the tree for its whole duration and keeps nothing
//! afterwards. The hierarchy must not be mutated from another thread while
//! a call is running.

pub mod attribute;
pub mod builder;
pub mod config;
pub mod error;
pub mod resolver;
pub mod sequence;
pub mod sink;
pub mod solver;
pub mod spec;
pub mod synth;
pub mod tree;

pub use attribute::{Attribute, Axis, Dimension, Edge, EdgeInsets, Priority, Relation};
pub use builder::{Batch, Layout, Placement};
pub use config::LayoutConfig;
pub use error::{ConfigError, ConstraintError, SolverError};
pub use resolver::find_owning_ancestor;
pub use sink::{ConstraintSink, RecordingSink};
pub use solver::{Frame, SolverSink};
pub use spec::{Anchor, ConstraintOptions, ConstraintOrigin, ConstraintSpec, Derived, GuideId};
pub use synth::constrain;
pub use tree::{ElementId, ElementTree, TreeAccess};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_then_attach_explicitly() {
        let mut tree = ElementTree::new();
        let root = tree.add_root("root");
        let a = tree.add_child(root, "a");

        let derived = constrain(
            &tree,
            a,
            Attribute::Left,
            Some(Anchor::Element(root)),
            None,
            &ConstraintOptions::new().with_offset(16.0),
            ConstraintOrigin::Custom,
        )
        .unwrap();
        assert_eq!(derived.owner, root);

        let mut sink = RecordingSink::new();
        assert!(sink.is_empty());
        let spec = derived.attach(&mut sink);
        assert_eq!(sink.entries(), &[(root, spec)]);
    }

    #[test]
    fn test_layout_reports_configured_defaults() {
        let tree = ElementTree::new();
        let mut sink = RecordingSink::new();
        let config = LayoutConfig::default()
            .with_separation(20.0)
            .with_priority(Priority::HIGH);
        let layout = Layout::with_config(&tree, &mut sink, config);
        assert_eq!(layout.separation(), 20.0);
        assert_eq!(layout.options().priority, Some(Priority::HIGH));
        assert!(layout.tree().is_empty());
        assert_eq!(layout.config().separation, 20.0);
    }
}
