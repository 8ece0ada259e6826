//! Fluent constraint builder
//!
//! [`Layout`] is the caller-facing front end. Every operation derives one or
//! more constraints through [`synth::constrain`], then attaches each one to
//! the sink on its owning ancestor. Single operations return a `Result`;
//! batch operations return a [`Batch`] and keep going past failures.
//!
//! The tree is borrowed for the duration of each call. Callers must not
//! mutate the hierarchy from another thread while a call is in flight.

use crate::attribute::{Attribute, Axis, Dimension, Edge, EdgeInsets, Priority, Relation};
use crate::config::LayoutConfig;
use crate::error::ConstraintError;
use crate::sink::ConstraintSink;
use crate::spec::{Anchor, ConstraintOptions, ConstraintOrigin, ConstraintSpec, GuideId};
use crate::synth::{self, edge_options, inward};
use crate::tree::{ElementId, TreeAccess};

/// Where to place an element relative to another
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Above,
    Below,
    LeftOf,
    RightOf,
}

impl Placement {
    /// Further along `axis`: right of, or below
    pub fn after(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => Placement::RightOf,
            Axis::Vertical => Placement::Below,
        }
    }

    /// Earlier along `axis`: left of, or above
    pub fn before(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => Placement::LeftOf,
            Axis::Vertical => Placement::Above,
        }
    }

    /// (subject attribute, target attribute) for this placement
    fn attributes(self) -> (Attribute, Attribute) {
        match self {
            Placement::Above => (Attribute::Bottom, Attribute::Top),
            Placement::Below => (Attribute::Top, Attribute::Bottom),
            Placement::LeftOf => (Attribute::Right, Attribute::Left),
            Placement::RightOf => (Attribute::Left, Attribute::Right),
        }
    }
}

/// Outcome of a multi-constraint operation
///
/// Partial success is normal: each sub-operation either lands in
/// `constraints` or in `failures`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    pub constraints: Vec<ConstraintSpec>,
    pub failures: Vec<ConstraintError>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: Result<ConstraintSpec, ConstraintError>) {
        match result {
            Ok(spec) => self.constraints.push(spec),
            Err(err) => self.failures.push(err),
        }
    }

    /// Fold another batch into this one
    pub fn extend(&mut self, other: Batch) {
        self.constraints.extend(other.constraints);
        self.failures.extend(other.failures);
    }

    /// True when every sub-operation produced its constraint
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Constraints produced by a given kind of operation
    pub fn with_origin(&self, origin: ConstraintOrigin) -> Vec<&ConstraintSpec> {
        self.constraints
            .iter()
            .filter(|spec| spec.origin == origin)
            .collect()
    }
}

/// Constraint builder over a tree and a sink
pub struct Layout<'a, T: TreeAccess + ?Sized, S: ConstraintSink + ?Sized> {
    tree: &'a T,
    sink: &'a mut S,
    config: LayoutConfig,
}

impl<'a, T: TreeAccess + ?Sized, S: ConstraintSink + ?Sized> Layout<'a, T, S> {
    pub fn new(tree: &'a T, sink: &'a mut S) -> Self {
        Self::with_config(tree, sink, LayoutConfig::default())
    }

    pub fn with_config(tree: &'a T, sink: &'a mut S, config: LayoutConfig) -> Self {
        Self { tree, sink, config }
    }

    pub fn tree(&self) -> &T {
        self.tree
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Configured default separation
    pub fn separation(&self) -> f64 {
        self.config.separation
    }

    /// Fresh options carrying the configured default priority
    pub fn options(&self) -> ConstraintOptions {
        ConstraintOptions::default().with_optional_priority(self.config.priority)
    }

    fn defaulted(&self, priority: Option<Priority>) -> Option<Priority> {
        priority.or(self.config.priority)
    }

    /// Derive and attach a single constraint
    ///
    /// On failure nothing is attached and the error is logged and returned.
    pub(crate) fn install(
        &mut self,
        subject: ElementId,
        subject_attribute: Attribute,
        target: Option<Anchor>,
        target_attribute: Option<Attribute>,
        options: ConstraintOptions,
        origin: ConstraintOrigin,
    ) -> Result<ConstraintSpec, ConstraintError> {
        let options = ConstraintOptions {
            priority: self.defaulted(options.priority),
            ..options
        };
        match synth::constrain(
            self.tree,
            subject,
            subject_attribute,
            target,
            target_attribute,
            &options,
            origin,
        ) {
            Ok(derived) => Ok(derived.attach(&mut *self.sink)),
            Err(err) => {
                log::warn!(
                    "dropping {:?} constraint on {}.{}: {}",
                    origin,
                    self.tree.label(subject),
                    subject_attribute,
                    err
                );
                Err(err)
            }
        }
    }

    /// Raw attribute-to-attribute constraint; the offset is used verbatim
    pub fn constrain(
        &mut self,
        view: ElementId,
        attribute: Attribute,
        target: impl Into<Anchor>,
        target_attribute: Attribute,
        options: ConstraintOptions,
    ) -> Result<ConstraintSpec, ConstraintError> {
        self.install(
            view,
            attribute,
            Some(target.into()),
            Some(target_attribute),
            options,
            ConstraintOrigin::Custom,
        )
    }

    // ========================================================================
    // Edge pinning
    // ========================================================================

    /// Pin an edge to the same edge of the superview, `offset` inward
    pub fn pin_edge_to_superview(
        &mut self,
        view: ElementId,
        edge: Edge,
        options: ConstraintOptions,
    ) -> Result<ConstraintSpec, ConstraintError> {
        match self.tree.parent(view) {
            Some(parent) => self.pin_edge(view, edge, edge, parent, options),
            None => {
                let err = ConstraintError::NoSuperview { element: view };
                log::warn!("cannot pin {}.{}: {}", self.tree.label(view), edge.attribute(), err);
                Err(err)
            }
        }
    }

    /// Pin all four edges to the superview with per-edge insets
    pub fn pin_edges_to_superview(
        &mut self,
        view: ElementId,
        insets: EdgeInsets,
        priority: Option<Priority>,
    ) -> Batch {
        self.pin_superview_edges(view, insets, None, priority)
    }

    /// Pin three edges to the superview, leaving `excluded` free
    pub fn pin_edges_to_superview_excluding(
        &mut self,
        view: ElementId,
        insets: EdgeInsets,
        excluded: Edge,
        priority: Option<Priority>,
    ) -> Batch {
        self.pin_superview_edges(view, insets, Some(excluded), priority)
    }

    fn pin_superview_edges(
        &mut self,
        view: ElementId,
        insets: EdgeInsets,
        excluded: Option<Edge>,
        priority: Option<Priority>,
    ) -> Batch {
        let mut batch = Batch::new();
        for edge in Edge::ALL {
            if Some(edge) == excluded {
                continue;
            }
            let mut options = ConstraintOptions::new().with_offset(insets.get(edge));
            options.priority = priority;
            batch.push(self.pin_edge_to_superview(view, edge, options));
        }
        batch
    }

    /// Pin an edge to an edge of another element or guide
    ///
    /// A positive offset moves the subject edge inward for trailing edges
    /// and away from the target edge otherwise.
    pub fn pin_edge(
        &mut self,
        view: ElementId,
        edge: Edge,
        to_edge: Edge,
        of: impl Into<Anchor>,
        options: ConstraintOptions,
    ) -> Result<ConstraintSpec, ConstraintError> {
        self.pin(view, edge, to_edge, of.into(), options, ConstraintOrigin::EdgePin)
    }

    pub(crate) fn pin(
        &mut self,
        view: ElementId,
        edge: Edge,
        to_edge: Edge,
        of: Anchor,
        options: ConstraintOptions,
        origin: ConstraintOrigin,
    ) -> Result<ConstraintSpec, ConstraintError> {
        let attribute = edge.attribute();
        self.install(
            view,
            attribute,
            Some(of),
            Some(to_edge.attribute()),
            edge_options(attribute, options),
            origin,
        )
    }

    /// Pin all four edges to a layout guide such as a safe area
    pub fn pin_edges_to_guide(
        &mut self,
        view: ElementId,
        guide: GuideId,
        insets: EdgeInsets,
        priority: Option<Priority>,
    ) -> Batch {
        let mut batch = Batch::new();
        for edge in Edge::ALL {
            let mut options = ConstraintOptions::new().with_offset(insets.get(edge));
            options.priority = priority;
            batch.push(self.pin_edge(view, edge, edge, guide, options));
        }
        batch
    }

    // ========================================================================
    // Centering and alignment
    // ========================================================================

    /// Center on both axes of the superview
    pub fn center_in_superview(&mut self, view: ElementId, priority: Option<Priority>) -> Batch {
        let mut batch = Batch::new();
        for axis in [Axis::Horizontal, Axis::Vertical] {
            let mut options = ConstraintOptions::new();
            options.priority = priority;
            batch.push(self.center_axis_in_superview(view, axis, options));
        }
        batch
    }

    /// Center on one axis of the superview; the offset shifts the center line
    pub fn center_axis_in_superview(
        &mut self,
        view: ElementId,
        axis: Axis,
        options: ConstraintOptions,
    ) -> Result<ConstraintSpec, ConstraintError> {
        match self.tree.parent(view) {
            Some(parent) => self.align_axis(view, axis, parent, options),
            None => {
                let err = ConstraintError::NoSuperview { element: view };
                log::warn!("cannot center {}: {}", self.tree.label(view), err);
                Err(err)
            }
        }
    }

    /// Align a center line with the same center line of another anchor
    pub fn align_axis(
        &mut self,
        view: ElementId,
        axis: Axis,
        with: impl Into<Anchor>,
        options: ConstraintOptions,
    ) -> Result<ConstraintSpec, ConstraintError> {
        let attribute = axis.center();
        self.install(
            view,
            attribute,
            Some(with.into()),
            Some(attribute),
            options,
            ConstraintOrigin::Center,
        )
    }

    // ========================================================================
    // Relative positioning
    // ========================================================================

    /// Place `view` beside `of` with a visual gap of `options.offset`
    pub fn position(
        &mut self,
        view: ElementId,
        placement: Placement,
        of: impl Into<Anchor>,
        options: ConstraintOptions,
    ) -> Result<ConstraintSpec, ConstraintError> {
        self.place(view, placement, of.into(), options, ConstraintOrigin::Position)
    }

    pub(crate) fn place(
        &mut self,
        view: ElementId,
        placement: Placement,
        of: Anchor,
        options: ConstraintOptions,
        origin: ConstraintOrigin,
    ) -> Result<ConstraintSpec, ConstraintError> {
        let (attribute, target_attribute) = placement.attributes();
        self.install(
            view,
            attribute,
            Some(of),
            Some(target_attribute),
            edge_options(attribute, options),
            origin,
        )
    }

    // ========================================================================
    // Sizing
    // ========================================================================

    /// Exact, minimum or maximum size on one dimension
    pub fn set_dimension(
        &mut self,
        view: ElementId,
        dimension: Dimension,
        value: f64,
        relation: Relation,
        priority: Option<Priority>,
    ) -> Result<ConstraintSpec, ConstraintError> {
        let mut options = ConstraintOptions::new()
            .with_offset(value)
            .with_relation(relation);
        options.priority = priority;
        self.install(
            view,
            dimension.attribute(),
            None,
            None,
            options,
            ConstraintOrigin::Size,
        )
    }

    /// Exact width and height
    pub fn set_size(
        &mut self,
        view: ElementId,
        width: f64,
        height: f64,
        priority: Option<Priority>,
    ) -> Batch {
        let mut batch = Batch::new();
        batch.push(self.set_dimension(view, Dimension::Width, width, Relation::Equal, priority));
        batch.push(self.set_dimension(view, Dimension::Height, height, Relation::Equal, priority));
        batch
    }

    /// Match a dimension of another element, `options.offset` smaller
    ///
    /// The offset is an inset: positive values shrink the subject.
    pub fn match_dimension(
        &mut self,
        view: ElementId,
        dimension: Dimension,
        to_dimension: Dimension,
        of: impl Into<Anchor>,
        options: ConstraintOptions,
    ) -> Result<ConstraintSpec, ConstraintError> {
        self.match_extent(
            view,
            dimension,
            to_dimension,
            of.into(),
            options,
            ConstraintOrigin::MatchSize,
        )
    }

    pub(crate) fn match_extent(
        &mut self,
        view: ElementId,
        dimension: Dimension,
        to_dimension: Dimension,
        of: Anchor,
        options: ConstraintOptions,
        origin: ConstraintOrigin,
    ) -> Result<ConstraintSpec, ConstraintError> {
        self.install(
            view,
            dimension.attribute(),
            Some(of),
            Some(to_dimension.attribute()),
            inward(options),
            origin,
        )
    }

    /// Match both dimensions of another element, inset on each
    pub fn match_size(
        &mut self,
        view: ElementId,
        of: impl Into<Anchor>,
        inset: f64,
        priority: Option<Priority>,
    ) -> Batch {
        let of = of.into();
        let mut batch = Batch::new();
        for dimension in [Dimension::Width, Dimension::Height] {
            let mut options = ConstraintOptions::new().with_offset(inset);
            options.priority = priority;
            batch.push(self.match_dimension(view, dimension, dimension, of, options));
        }
        batch
    }

    /// `width == height * ratio`, registered on the view itself
    ///
    /// # Panics
    ///
    /// If `ratio` is not a positive finite number.
    pub fn aspect_ratio(
        &mut self,
        view: ElementId,
        ratio: f64,
        priority: Option<Priority>,
    ) -> Result<ConstraintSpec, ConstraintError> {
        assert!(
            ratio.is_finite() && ratio > 0.0,
            "aspect ratio must be positive, got {}",
            ratio
        );
        let mut options = ConstraintOptions::new().with_multiplier(ratio);
        options.priority = priority;
        self.install(
            view,
            Attribute::Width,
            Some(Anchor::Element(view)),
            Some(Attribute::Height),
            options,
            ConstraintOrigin::AspectRatio,
        )
    }
}
