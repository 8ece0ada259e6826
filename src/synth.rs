//! Constraint synthesis
//!
//! Turns one request (subject attribute, optional target attribute, options)
//! into a [`ConstraintSpec`] plus the owner it must be registered on. The
//! derivation is pure; attaching is a separate, explicit step on [`Derived`].
//!
//! # Sign convention
//!
//! Callers speak in visual distances: a positive offset moves an edge inward
//! or widens a gap. Equations speak in coordinates. For trailing edges
//! (right, bottom), for "above"/"left of" placement and for dimension insets
//! the two disagree, so the offset is negated before the [`ConstraintSpec`]
//! is built. The relation is always the caller's. [`inward`] is the one place
//! this happens.

use crate::attribute::{Attribute, Relation};
use crate::error::ConstraintError;
use crate::resolver::find_owning_ancestor;
use crate::spec::{Anchor, ConstraintOptions, ConstraintOrigin, ConstraintSpec, Derived};
use crate::tree::{ElementId, TreeAccess};

/// Derive one constraint without attaching it
///
/// With no target this is a pure size constraint: the multiplier is fixed
/// at 0 and the offset is the literal size. With a target and no target
/// attribute the subject attribute is paired with itself.
///
/// # Panics
///
/// If a multiplier or target attribute is supplied without a target, or if
/// the multiplier or offset is not finite.
pub fn constrain<T: TreeAccess + ?Sized>(
    tree: &T,
    subject: ElementId,
    subject_attribute: Attribute,
    target: Option<Anchor>,
    target_attribute: Option<Attribute>,
    options: &ConstraintOptions,
    origin: ConstraintOrigin,
) -> Result<Derived, ConstraintError> {
    assert!(
        options.offset.is_finite(),
        "constraint offset must be finite, got {}",
        options.offset
    );

    let (target_attribute, multiplier) = match target {
        None => {
            assert!(
                options.multiplier.is_none(),
                "multiplier supplied for {}.{} without a target",
                subject,
                subject_attribute
            );
            assert!(
                target_attribute.is_none(),
                "target attribute supplied for {}.{} without a target",
                subject,
                subject_attribute
            );
            (None, 0.0)
        }
        Some(_) => {
            let multiplier = options.multiplier.unwrap_or(1.0);
            assert!(
                multiplier.is_finite(),
                "constraint multiplier must be finite, got {}",
                multiplier
            );
            (Some(target_attribute.unwrap_or(subject_attribute)), multiplier)
        }
    };

    let owner = find_owning_ancestor(tree, subject, target)?;

    Ok(Derived {
        spec: ConstraintSpec {
            subject,
            subject_attribute,
            relation: options.relation,
            target,
            target_attribute,
            multiplier,
            constant: options.offset,
            priority: options.priority,
            origin,
        },
        owner,
    })
}

/// Options with the offset negated; the relation is the caller's
pub fn inward(options: ConstraintOptions) -> ConstraintOptions {
    ConstraintOptions {
        offset: negate(options.offset),
        ..options
    }
}

/// Apply the trailing-edge convention when `attribute` is right or bottom
pub fn edge_options(attribute: Attribute, options: ConstraintOptions) -> ConstraintOptions {
    if attribute.is_trailing() {
        inward(options)
    } else {
        options
    }
}

/// Negation that never produces `-0.0`
pub(crate) fn negate(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        -value
    }
}
