//! Error types for constraint derivation, configuration and solving

use thiserror::Error;

use crate::spec::Anchor;
use crate::tree::ElementId;

/// Recoverable failures when deriving a constraint
///
/// No constraint is produced or attached when one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConstraintError {
    /// The subject needs a parent and has none
    #[error("element {element} has no superview")]
    NoSuperview { element: ElementId },

    /// The subject and target live in disjoint hierarchies
    #[error("element {element} shares no common ancestor with {target}")]
    NoCommonAncestor { element: ElementId, target: Anchor },
}

impl ConstraintError {
    /// The element the failed request was made for
    pub fn element(&self) -> ElementId {
        match self {
            Self::NoSuperview { element } | Self::NoCommonAncestor { element, .. } => *element,
        }
    }
}

/// Errors that can occur when loading a layout configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read layout config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse layout config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Unknown priority level '{0}'")]
    UnknownPriority(String),
}

/// Errors reported by the solver-backed sink
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("Unsatisfiable constraint {constraint}: {reason}")]
    Unsatisfiable { constraint: String, reason: String },

    #[error("Internal solver error: {0}")]
    Internal(String),
}
