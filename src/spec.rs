//! Constraint specifications
//!
//! A [`ConstraintSpec`] is one primitive linear constraint,
//! `subject.attribute REL multiplier * target.attribute + constant`,
//! ready to hand to a layout host. [`Derived`] pairs it with the element
//! it must be registered on.

use std::fmt;

use crate::attribute::{Attribute, Priority, Relation};
use crate::sink::ConstraintSink;
use crate::tree::{ElementId, TreeAccess};

/// Opaque handle to a non-element anchor such as a safe-area guide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GuideId(pub u32);

impl fmt::Display for GuideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "guide#{}", self.0)
    }
}

/// Target of a constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// An element in the hierarchy
    Element(ElementId),
    /// A layout guide scoped to the subject's parent; not walked for ancestry
    Guide(GuideId),
}

impl Anchor {
    pub fn element(self) -> Option<ElementId> {
        match self {
            Anchor::Element(id) => Some(id),
            Anchor::Guide(_) => None,
        }
    }

    fn label<T: TreeAccess + ?Sized>(self, tree: &T) -> String {
        match self {
            Anchor::Element(id) => tree.label(id),
            Anchor::Guide(guide) => guide.to_string(),
        }
    }
}

impl From<ElementId> for Anchor {
    fn from(id: ElementId) -> Self {
        Anchor::Element(id)
    }
}

impl From<GuideId> for Anchor {
    fn from(guide: GuideId) -> Self {
        Anchor::Guide(guide)
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::Element(id) => id.fmt(f),
            Anchor::Guide(guide) => guide.fmt(f),
        }
    }
}

/// Which operation produced a constraint (for diagnostics and tests)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintOrigin {
    /// Raw attribute-to-attribute request
    Custom,
    /// Edge pinned to a superview, sibling or guide
    EdgePin,
    /// Center line aligned to a superview or sibling
    Center,
    /// Placed above/below/beside a sibling
    Position,
    /// Fixed, minimum or maximum size
    Size,
    /// Dimension matched to another element
    MatchSize,
    /// Width tied to own height
    AspectRatio,
    /// Sequence planner: equal extent between neighbours
    EqualExtent,
    /// Sequence planner: neighbour placed at the separation gap
    Adjacency,
    /// Sequence planner: container edge bound to the content span
    Binding,
    /// Sequence planner: soft gap around the center line
    Straddle,
}

/// Tunables for a single constraint request
///
/// Defaults: relation `Equal`, multiplier 1 (unspecified), offset 0, no
/// priority.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConstraintOptions {
    pub relation: Relation,
    /// `None` means the conventional multiplier of 1. Supplying one for a
    /// target-less constraint is a programming error.
    pub multiplier: Option<f64>,
    /// Caller-facing offset, before any sign convention is applied
    pub offset: f64,
    pub priority: Option<Priority>,
}

impl ConstraintOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_relation(mut self, relation: Relation) -> Self {
        self.relation = relation;
        self
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = Some(multiplier);
        self
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Apply `priority` only if one is given
    pub fn with_optional_priority(mut self, priority: Option<Priority>) -> Self {
        if priority.is_some() {
            self.priority = priority;
        }
        self
    }
}

/// A fully resolved primitive constraint
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintSpec {
    pub subject: ElementId,
    pub subject_attribute: Attribute,
    pub relation: Relation,
    pub target: Option<Anchor>,
    pub target_attribute: Option<Attribute>,
    /// Always 0 when there is no target
    pub multiplier: f64,
    pub constant: f64,
    pub priority: Option<Priority>,
    pub origin: ConstraintOrigin,
}

impl ConstraintSpec {
    /// True for a pure size constraint with no second item
    pub fn is_size_only(&self) -> bool {
        self.target.is_none()
    }

    /// Elements this constraint references, subject first
    pub fn elements(&self) -> impl Iterator<Item = ElementId> {
        std::iter::once(self.subject).chain(self.target.and_then(Anchor::element))
    }

    /// Render the equation with element names from `tree`
    pub fn describe<T: TreeAccess + ?Sized>(&self, tree: &T) -> String {
        self.render(&tree.label(self.subject), self.target.map(|t| t.label(tree)))
    }

    fn render(&self, subject: &str, target: Option<String>) -> String {
        let mut out = format!("{}.{} {} ", subject, self.subject_attribute, self.relation);
        match (target, self.target_attribute) {
            (Some(target), Some(attribute)) => {
                out.push_str(&format!("{}.{}", target, attribute));
                if self.multiplier != 1.0 {
                    out.push_str(&format!(" * {}", self.multiplier));
                }
                if self.constant > 0.0 {
                    out.push_str(&format!(" + {}", self.constant));
                } else if self.constant < 0.0 {
                    out.push_str(&format!(" - {}", -self.constant));
                }
            }
            _ => out.push_str(&self.constant.to_string()),
        }
        if let Some(priority) = self.priority {
            out.push_str(&format!(" @{}", priority));
        }
        out
    }
}

impl fmt::Display for ConstraintSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.render(
            &self.subject.to_string(),
            self.target.map(|t| t.to_string()),
        );
        f.write_str(&rendered)
    }
}

/// A derived constraint together with its owning ancestor
#[derive(Debug, Clone, PartialEq)]
pub struct Derived {
    pub spec: ConstraintSpec,
    pub owner: ElementId,
}

impl Derived {
    /// Hand the constraint to `sink`, registered on the owner
    pub fn attach<S: ConstraintSink + ?Sized>(self, sink: &mut S) -> ConstraintSpec {
        log::debug!("attach on {}: {}", self.owner, self.spec);
        sink.attach(&self.spec, self.owner);
        self.spec
    }
}
