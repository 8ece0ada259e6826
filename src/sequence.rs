//! Sequence layout planning
//!
//! Lays out an ordered run of sibling elements along one axis by chaining
//! pairwise constraints:
//! - [`Layout::fill`]: stretch the run across the superview, equal extents
//! - [`Layout::bound`]: size a container around the run
//! - [`Layout::distribute`]: center the run as a group
//!
//! Element order is significant: first to last is left to right, or top to
//! bottom. An empty run is a programming error and panics.

use crate::attribute::{Attribute, Axis, Priority, Relation};
use crate::builder::{Batch, Layout, Placement};
use crate::error::ConstraintError;
use crate::sink::ConstraintSink;
use crate::spec::{Anchor, ConstraintOptions, ConstraintOrigin, ConstraintSpec};
use crate::tree::{ElementId, TreeAccess};

impl<'a, T: TreeAccess + ?Sized, S: ConstraintSink + ?Sized> Layout<'a, T, S> {
    /// Fill the superview along `axis`
    ///
    /// The first element's leading edge and the last element's trailing edge
    /// sit `separation` inside the superview. Each neighbour pair gets equal
    /// extents and a `separation` gap. `None` uses the configured separation.
    ///
    /// The trailing pin follows the trailing-edge sign rule, so its stored
    /// constant is `-separation`.
    ///
    /// # Panics
    ///
    /// If `elements` is empty.
    pub fn fill(
        &mut self,
        elements: &[ElementId],
        axis: Axis,
        separation: Option<f64>,
        priority: Option<Priority>,
    ) -> Batch {
        assert!(!elements.is_empty(), "cannot fill with an empty element list");
        let separation = separation.unwrap_or_else(|| self.separation());
        let gap = spaced(separation, priority);
        let mut batch = Batch::new();

        let first = elements[0];
        let last = elements[elements.len() - 1];
        batch.push(self.pin_edge_to_superview(first, axis.leading_edge(), gap));

        for i in 1..elements.len() {
            let prev = elements[i - 1];
            let curr = elements[i];
            let dimension = axis.dimension();
            batch.push(self.match_extent(
                prev,
                dimension,
                dimension,
                Anchor::Element(curr),
                spaced(0.0, priority),
                ConstraintOrigin::EqualExtent,
            ));
            batch.push(self.place(
                curr,
                Placement::after(axis),
                Anchor::Element(prev),
                gap,
                ConstraintOrigin::Adjacency,
            ));
        }

        batch.push(self.pin_edge_to_superview(last, axis.trailing_edge(), gap));
        batch
    }

    /// Chain the elements along `axis` and wrap `container` around them
    ///
    /// Elements keep their own extents. The container's leading and trailing
    /// edges end up `separation` outside the first and last element. `None`
    /// uses the configured separation.
    ///
    /// Both bindings take an offset of `-separation`; the trailing one is
    /// stored with constant `+separation` after the trailing-edge sign rule.
    ///
    /// # Panics
    ///
    /// If `elements` is empty.
    pub fn bound(
        &mut self,
        container: ElementId,
        elements: &[ElementId],
        axis: Axis,
        separation: Option<f64>,
        priority: Option<Priority>,
    ) -> Batch {
        assert!(!elements.is_empty(), "cannot bound an empty element list");
        let separation = separation.unwrap_or_else(|| self.separation());
        let mut batch = Batch::new();
        self.chain_after(elements, 1, axis, separation, priority, &mut batch);

        let first = elements[0];
        let last = elements[elements.len() - 1];
        let outset = spaced(-separation, priority);
        batch.push(self.pin(
            container,
            axis.leading_edge(),
            axis.leading_edge(),
            Anchor::Element(first),
            outset,
            ConstraintOrigin::Binding,
        ));
        batch.push(self.pin(
            container,
            axis.trailing_edge(),
            axis.trailing_edge(),
            Anchor::Element(last),
            outset,
            ConstraintOrigin::Binding,
        ));
        batch
    }

    /// Center the run as a group on the superview's center line for `axis`
    ///
    /// With an odd count the middle element sits exactly on the center line.
    /// With an even count the two middle elements straddle it with `<=`
    /// relations only: the earlier one's trailing edge is at most
    /// `center - separation / 2`, the later one's leading edge at most
    /// `center + separation / 2`. The remaining elements chain outward from
    /// the middle in both directions. `None` uses the configured separation.
    ///
    /// # Panics
    ///
    /// If `elements` is empty.
    pub fn distribute(
        &mut self,
        elements: &[ElementId],
        axis: Axis,
        separation: Option<f64>,
        priority: Option<Priority>,
    ) -> Batch {
        assert!(
            !elements.is_empty(),
            "cannot distribute an empty element list"
        );
        let separation = separation.unwrap_or_else(|| self.separation());
        let count = elements.len();
        let mut batch = Batch::new();

        let (before_end, after_start) = if count % 2 == 1 {
            let middle = count / 2;
            batch.push(self.center_axis_in_superview(
                elements[middle],
                axis,
                spaced(0.0, priority),
            ));
            (middle, middle + 1)
        } else {
            let lower = count / 2 - 1;
            let upper = count / 2;
            let half = separation / 2.0;
            batch.push(self.straddle(elements[lower], axis.trailing(), axis, -half, priority));
            batch.push(self.straddle(elements[upper], axis.leading(), axis, half, priority));
            (lower, upper + 1)
        };

        self.chain_after(elements, after_start, axis, separation, priority, &mut batch);

        for i in (0..before_end).rev() {
            batch.push(self.place(
                elements[i],
                Placement::before(axis),
                Anchor::Element(elements[i + 1]),
                spaced(separation, priority),
                ConstraintOrigin::Adjacency,
            ));
        }

        batch
    }

    /// Place each of `elements[start..]` after its predecessor
    fn chain_after(
        &mut self,
        elements: &[ElementId],
        start: usize,
        axis: Axis,
        separation: f64,
        priority: Option<Priority>,
        batch: &mut Batch,
    ) {
        for i in start.max(1)..elements.len() {
            batch.push(self.place(
                elements[i],
                Placement::after(axis),
                Anchor::Element(elements[i - 1]),
                spaced(separation, priority),
                ConstraintOrigin::Adjacency,
            ));
        }
    }

    /// Hold `attribute` at or before the superview's center line plus
    /// `constant`, used verbatim
    fn straddle(
        &mut self,
        view: ElementId,
        attribute: Attribute,
        axis: Axis,
        constant: f64,
        priority: Option<Priority>,
    ) -> Result<ConstraintSpec, ConstraintError> {
        let Some(parent) = self.tree().parent(view) else {
            let err = ConstraintError::NoSuperview { element: view };
            log::warn!("cannot straddle {}: {}", self.tree().label(view), err);
            return Err(err);
        };
        let mut options = ConstraintOptions::new()
            .with_offset(constant)
            .with_relation(Relation::LessOrEqual);
        options.priority = priority;
        self.install(
            view,
            attribute,
            Some(Anchor::Element(parent)),
            Some(axis.center()),
            options,
            ConstraintOrigin::Straddle,
        )
    }
}

fn spaced(offset: f64, priority: Option<Priority>) -> ConstraintOptions {
    let mut options = ConstraintOptions::new().with_offset(offset);
    options.priority = priority;
    options
}
