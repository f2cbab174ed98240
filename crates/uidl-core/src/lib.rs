//! Core UIDL types and validation for the UIDL code generator.
//!
//! This crate provides the foundational types used by the resolver and the
//! code generator:
//! - The UIDL node union and the component/project envelopes
//! - Dependency records for imports required by generated code
//! - Node paths for locating problems inside a tree
//! - Error types for validation and scope resolution

pub mod ast;
pub mod builders;
pub mod errors;
pub mod path;
pub mod validate;

pub use ast::*;
pub use errors::*;
pub use path::{NodePath, PathSegment};
pub use validate::{validate_component, validate_node, validate_project};

#[cfg(feature = "serde")]
pub use validate::{parse_component, parse_project, validate_node_value};
