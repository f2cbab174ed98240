//! Error types for UIDL validation and scope resolution.

use crate::ast::ReferenceType;
use crate::path::NodePath;
use thiserror::Error;

/// Top-level error type for UIDL checks.
#[derive(Debug, Error)]
pub enum UidlError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Structurally invalid UIDL input.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Malformed UIDL at {path}: {reason}")]
    Malformed { path: NodePath, reason: String },

    #[error("Unsupported node type '{node_type}' at {path}")]
    UnsupportedNodeType { path: NodePath, node_type: String },

    #[error("Unsupported attribute '{attribute}' of type '{kind}' at {path}")]
    UnsupportedAttribute {
        path: NodePath,
        attribute: String,
        kind: String,
    },

    #[error("Component name '{name}' is used more than once")]
    DuplicateComponent { name: String },

    #[cfg(feature = "serde")]
    #[error("Invalid UIDL JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ValidationError {
    pub fn malformed(path: &NodePath, reason: impl Into<String>) -> Self {
        ValidationError::Malformed {
            path: path.clone(),
            reason: reason.into(),
        }
    }
}

/// A name used by the UIDL that is not declared in scope.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Unresolved {reference_type} reference '{id}' at {path} in component {component}")]
    UnresolvedReference {
        component: String,
        id: String,
        reference_type: ReferenceType,
        path: NodePath,
    },

    #[error("Event '{event}' at {path} modifies undeclared state '{state}' in component {component}")]
    UnknownStateTarget {
        component: String,
        event: String,
        state: String,
        path: NodePath,
    },

    #[error("Event '{event}' at {path} calls undeclared prop '{prop}' in component {component}")]
    UnknownPropCall {
        component: String,
        event: String,
        prop: String,
        path: NodePath,
    },
}
