//! Attributes, relations and priorities
//!
//! The vocabulary a constraint is written in: which edge or axis of an
//! element is constrained, how the two sides relate, and how strongly the
//! host should try to honour it.

use std::fmt;

/// A semantic edge, center line or dimension of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Top,
    Left,
    Bottom,
    Right,
    CenterX,
    CenterY,
    Width,
    Height,
}

impl Attribute {
    /// Trailing edges (right, bottom) take negated offsets when pinned
    pub fn is_trailing(self) -> bool {
        matches!(self, Attribute::Right | Attribute::Bottom)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Attribute::Top => "top",
            Attribute::Left => "left",
            Attribute::Bottom => "bottom",
            Attribute::Right => "right",
            Attribute::CenterX => "center_x",
            Attribute::CenterY => "center_y",
            Attribute::Width => "width",
            Attribute::Height => "height",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Layout axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Left or top
    pub fn leading(self) -> Attribute {
        match self {
            Axis::Horizontal => Attribute::Left,
            Axis::Vertical => Attribute::Top,
        }
    }

    /// Right or bottom
    pub fn trailing(self) -> Attribute {
        match self {
            Axis::Horizontal => Attribute::Right,
            Axis::Vertical => Attribute::Bottom,
        }
    }

    pub fn leading_edge(self) -> Edge {
        match self {
            Axis::Horizontal => Edge::Left,
            Axis::Vertical => Edge::Top,
        }
    }

    pub fn trailing_edge(self) -> Edge {
        match self {
            Axis::Horizontal => Edge::Right,
            Axis::Vertical => Edge::Bottom,
        }
    }

    /// Center line running across this axis
    pub fn center(self) -> Attribute {
        match self {
            Axis::Horizontal => Attribute::CenterX,
            Axis::Vertical => Attribute::CenterY,
        }
    }

    pub fn dimension(self) -> Dimension {
        match self {
            Axis::Horizontal => Dimension::Width,
            Axis::Vertical => Dimension::Height,
        }
    }
}

/// One of the four pinnable edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Left,
    Bottom,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Left, Edge::Bottom, Edge::Right];

    pub fn attribute(self) -> Attribute {
        match self {
            Edge::Top => Attribute::Top,
            Edge::Left => Attribute::Left,
            Edge::Bottom => Attribute::Bottom,
            Edge::Right => Attribute::Right,
        }
    }
}

impl From<Edge> for Attribute {
    fn from(edge: Edge) -> Self {
        edge.attribute()
    }
}

/// Width or height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Width,
    Height,
}

impl Dimension {
    pub fn attribute(self) -> Attribute {
        match self {
            Dimension::Width => Attribute::Width,
            Dimension::Height => Attribute::Height,
        }
    }
}

impl From<Dimension> for Attribute {
    fn from(dimension: Dimension) -> Self {
        dimension.attribute()
    }
}

/// Relational operator between the two sides of a constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Relation {
    #[default]
    Equal,
    LessOrEqual,
    GreaterOrEqual,
}

impl Relation {
    pub fn symbol(self) -> &'static str {
        match self {
            Relation::Equal => "==",
            Relation::LessOrEqual => "<=",
            Relation::GreaterOrEqual => ">=",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Soft-constraint weight, passed through to the layout host untouched
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Priority(pub f32);

impl Priority {
    pub const REQUIRED: Priority = Priority(1000.0);
    pub const HIGH: Priority = Priority(750.0);
    pub const LOW: Priority = Priority(250.0);
    pub const FITTING: Priority = Priority(50.0);

    pub fn value(self) -> f32 {
        self.0
    }

    pub fn is_required(self) -> bool {
        self.0 >= Self::REQUIRED.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::REQUIRED
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-edge inward offsets
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeInsets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl EdgeInsets {
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Same inset on every edge
    pub fn uniform(inset: f64) -> Self {
        Self::new(inset, inset, inset, inset)
    }

    pub fn get(&self, edge: Edge) -> f64 {
        match edge {
            Edge::Top => self.top,
            Edge::Left => self.left,
            Edge::Bottom => self.bottom,
            Edge::Right => self.right,
        }
    }
}
