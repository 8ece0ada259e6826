//! Solver-backed constraint sink
//!
//! A reference layout host: every attached [`ConstraintSpec`] is translated
//! into a Cassowary constraint over per-item `x`, `y`, `width` and `height`
//! variables and handed to the kasuari solver. All items share one
//! coordinate space, so solved frames are absolute.

use std::collections::{HashMap, HashSet};

use kasuari::{
    Expression, Solver as KasuariSolver, Strength, Variable as KasuariVariable,
    WeightedRelation::*,
};

use crate::attribute::{Attribute, Priority, Relation};
use crate::error::SolverError;
use crate::sink::ConstraintSink;
use crate::spec::{Anchor, ConstraintSpec};
use crate::tree::ElementId;

/// Base properties with a solver variable each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutProperty {
    X,
    Y,
    Width,
    Height,
}

/// A variable in the constraint system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutVariable {
    pub item: Anchor,
    pub property: LayoutProperty,
}

impl LayoutVariable {
    pub fn new(item: impl Into<Anchor>, property: LayoutProperty) -> Self {
        Self {
            item: item.into(),
            property,
        }
    }
}

/// A solved rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Value of an attribute on this frame
    pub fn attribute(&self, attribute: Attribute) -> f64 {
        match attribute {
            Attribute::Top => self.y,
            Attribute::Left => self.x,
            Attribute::Bottom => self.bottom(),
            Attribute::Right => self.right(),
            Attribute::CenterX => self.center_x(),
            Attribute::CenterY => self.center_y(),
            Attribute::Width => self.width,
            Attribute::Height => self.height,
        }
    }
}

/// Map a host priority onto the solver's strength bands
pub fn strength(priority: Option<Priority>) -> Strength {
    match priority {
        None => Strength::REQUIRED,
        Some(p) if p.is_required() => Strength::REQUIRED,
        Some(p) if p >= Priority::HIGH => Strength::STRONG,
        Some(p) if p >= Priority::LOW => Strength::MEDIUM,
        Some(_) => Strength::WEAK,
    }
}

/// Constraint sink that feeds a kasuari solver
pub struct SolverSink {
    solver: KasuariSolver,
    /// Maps our variables to kasuari variables
    variables: HashMap<LayoutVariable, KasuariVariable>,
    /// Reverse of `variables`, for reading solver changes
    owners: HashMap<KasuariVariable, LayoutVariable>,
    /// Latest known value of every variable the solver has reported
    values: HashMap<LayoutVariable, f64>,
    edits: HashSet<LayoutVariable>,
    attached: usize,
    rejected: Vec<SolverError>,
}

impl SolverSink {
    pub fn new() -> Self {
        Self {
            solver: KasuariSolver::new(),
            variables: HashMap::new(),
            owners: HashMap::new(),
            values: HashMap::new(),
            edits: HashSet::new(),
            attached: 0,
            rejected: Vec::new(),
        }
    }

    fn get_or_create_var(&mut self, var: LayoutVariable) -> KasuariVariable {
        if let Some(kvar) = self.variables.get(&var) {
            return *kvar;
        }
        let kvar = KasuariVariable::new();
        self.variables.insert(var, kvar);
        self.owners.insert(kvar, var);
        kvar
    }

    fn base(&mut self, item: Anchor, property: LayoutProperty) -> KasuariVariable {
        self.get_or_create_var(LayoutVariable::new(item, property))
    }

    /// Expression for an attribute; edges and centers derive from x/y/size
    fn get_expression(&mut self, item: Anchor, attribute: Attribute) -> Expression {
        match attribute {
            Attribute::Left => self.base(item, LayoutProperty::X).into(),
            Attribute::Top => self.base(item, LayoutProperty::Y).into(),
            Attribute::Width => self.base(item, LayoutProperty::Width).into(),
            Attribute::Height => self.base(item, LayoutProperty::Height).into(),
            Attribute::Right => {
                let x = self.base(item, LayoutProperty::X);
                let width = self.base(item, LayoutProperty::Width);
                x + width
            }
            Attribute::Bottom => {
                let y = self.base(item, LayoutProperty::Y);
                let height = self.base(item, LayoutProperty::Height);
                y + height
            }
            Attribute::CenterX => {
                let x = self.base(item, LayoutProperty::X);
                let width = self.base(item, LayoutProperty::Width);
                x + width * 0.5
            }
            Attribute::CenterY => {
                let y = self.base(item, LayoutProperty::Y);
                let height = self.base(item, LayoutProperty::Height);
                y + height * 0.5
            }
        }
    }

    fn add(
        &mut self,
        lhs: Expression,
        relation: Relation,
        strength: Strength,
        rhs: Expression,
        desc: &str,
    ) -> Result<(), SolverError> {
        let constraint = match relation {
            Relation::Equal => lhs | EQ(strength) | rhs,
            Relation::LessOrEqual => lhs | LE(strength) | rhs,
            Relation::GreaterOrEqual => lhs | GE(strength) | rhs,
        };
        self.solver
            .add_constraint(constraint)
            .map_err(|e| convert_kasuari_error(e, desc))
    }

    /// Translate and add one spec
    pub fn add_spec(&mut self, spec: &ConstraintSpec) -> Result<(), SolverError> {
        let desc = spec.to_string();
        let lhs = self.get_expression(Anchor::Element(spec.subject), spec.subject_attribute);
        let rhs = match (spec.target, spec.target_attribute) {
            (Some(target), Some(attribute)) => {
                self.get_expression(target, attribute) * spec.multiplier + spec.constant
            }
            _ => Expression::from_constant(spec.constant),
        };
        self.add(lhs, spec.relation, strength(spec.priority), rhs, &desc)
    }

    /// Pin an element or guide to an exact frame
    pub fn fix_frame(&mut self, item: impl Into<Anchor>, frame: Frame) -> Result<(), SolverError> {
        let item = item.into();
        let desc = format!("{} frame", item);
        for (property, value) in [
            (LayoutProperty::X, frame.x),
            (LayoutProperty::Y, frame.y),
            (LayoutProperty::Width, frame.width),
            (LayoutProperty::Height, frame.height),
        ] {
            let var: Expression = self.base(item, property).into();
            self.add(
                var,
                Relation::Equal,
                Strength::REQUIRED,
                Expression::from_constant(value),
                &desc,
            )?;
        }
        Ok(())
    }

    /// Suggest a preferred size, the way intrinsic content size does
    pub fn suggest_size(
        &mut self,
        element: ElementId,
        width: f64,
        height: f64,
    ) -> Result<(), SolverError> {
        self.suggest_value(LayoutVariable::new(element, LayoutProperty::Width), width)?;
        self.suggest_value(LayoutVariable::new(element, LayoutProperty::Height), height)
    }

    /// Add an edit variable with suggested value
    pub fn suggest_value(&mut self, var: LayoutVariable, value: f64) -> Result<(), SolverError> {
        let kvar = self.get_or_create_var(var);
        if self.edits.insert(var) {
            self.solver
                .add_edit_variable(kvar, Strength::MEDIUM)
                .map_err(|e| SolverError::Internal(format!("Failed to add edit variable: {}", e)))?;
        }
        self.solver
            .suggest_value(kvar, value)
            .map_err(|e| SolverError::Internal(format!("Failed to suggest value: {}", e)))?;
        Ok(())
    }

    /// Pull pending changes from the solver
    pub fn solve(&mut self) {
        let changes = self.solver.fetch_changes();
        for (kvar, value) in changes {
            if let Some(var) = self.owners.get(kvar) {
                self.values.insert(*var, *value);
            }
        }
    }

    /// Value of a variable after the last [`solve`](Self::solve); unset is 0
    pub fn value(&self, var: LayoutVariable) -> f64 {
        self.values.get(&var).copied().unwrap_or(0.0)
    }

    /// Solved frame of an element or guide
    pub fn frame(&self, item: impl Into<Anchor>) -> Frame {
        let item = item.into();
        Frame::new(
            self.value(LayoutVariable::new(item, LayoutProperty::X)),
            self.value(LayoutVariable::new(item, LayoutProperty::Y)),
            self.value(LayoutVariable::new(item, LayoutProperty::Width)),
            self.value(LayoutVariable::new(item, LayoutProperty::Height)),
        )
    }

    /// Number of specs accepted by the solver
    pub fn attached(&self) -> usize {
        self.attached
    }

    /// Specs the solver refused
    pub fn rejected(&self) -> &[SolverError] {
        &self.rejected
    }
}

impl Default for SolverSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstraintSink for SolverSink {
    fn attach(&mut self, spec: &ConstraintSpec, _owner: ElementId) {
        match self.add_spec(spec) {
            Ok(()) => self.attached += 1,
            Err(err) => {
                log::warn!("solver rejected {}: {}", spec, err);
                self.rejected.push(err);
            }
        }
    }
}

/// Convert a kasuari error to a SolverError with context
fn convert_kasuari_error(e: kasuari::AddConstraintError, desc: &str) -> SolverError {
    match e {
        kasuari::AddConstraintError::UnsatisfiableConstraint => SolverError::Unsatisfiable {
            constraint: desc.to_string(),
            reason: "conflicts with existing constraints".to_string(),
        },
        kasuari::AddConstraintError::DuplicateConstraint => {
            SolverError::Internal(format!("Duplicate constraint: {}", desc))
        }
        kasuari::AddConstraintError::InternalSolverError(msg) => {
            SolverError::Internal(format!("Internal solver error for {}: {}", desc, msg))
        }
    }
}
