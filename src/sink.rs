//! Constraint sinks
//!
//! A sink is the layout host's side of the boundary: it receives each
//! derived constraint together with the element it is registered on.

use crate::spec::{ConstraintOrigin, ConstraintSpec};
use crate::tree::ElementId;

/// Receiver for derived constraints
///
/// Attachment is fire-and-forget from the core's point of view; failures
/// inside the host are the host's concern.
pub trait ConstraintSink {
    fn attach(&mut self, spec: &ConstraintSpec, owner: ElementId);
}

/// Sink that keeps every constraint in attachment order
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    entries: Vec<(ElementId, ConstraintSpec)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All constraints with their owners, in attachment order
    pub fn entries(&self) -> &[(ElementId, ConstraintSpec)] {
        &self.entries
    }

    /// Constraints registered on `owner`
    pub fn constraints_on(&self, owner: ElementId) -> Vec<&ConstraintSpec> {
        self.entries
            .iter()
            .filter(|(o, _)| *o == owner)
            .map(|(_, spec)| spec)
            .collect()
    }

    /// Constraints produced by a given kind of operation
    pub fn with_origin(&self, origin: ConstraintOrigin) -> Vec<&ConstraintSpec> {
        self.entries
            .iter()
            .filter(|(_, spec)| spec.origin == origin)
            .map(|(_, spec)| spec)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl ConstraintSink for RecordingSink {
    fn attach(&mut self, spec: &ConstraintSpec, owner: ElementId) {
        self.entries.push((owner, spec.clone()));
    }
}

impl<S: ConstraintSink + ?Sized> ConstraintSink for &mut S {
    fn attach(&mut self, spec: &ConstraintSpec, owner: ElementId) {
        (**self).attach(spec, owner);
    }
}
