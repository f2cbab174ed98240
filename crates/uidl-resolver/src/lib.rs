//! Scope resolution for UIDL documents.
//!
//! This crate checks that:
//! - Dynamic references name a declared prop, state, token or repeat local
//! - Event handlers mutate declared state and call declared props
//! - Component names are unique within a project

mod references;

pub use references::resolve_references;

use tracing::debug;
use uidl_core::{validate_project, ComponentUidl, ProjectUidl, ResolveError, UidlError};

/// Resolve all references in a component.
pub fn resolve_component(component: &ComponentUidl) -> Result<(), ResolveError> {
    debug!(component = %component.name, "Resolving component scope");
    resolve_references(component)
}

/// Validate a project and resolve every component in it.
pub fn resolve_project(project: &ProjectUidl) -> Result<(), UidlError> {
    validate_project(project)?;
    resolve_component(&project.root)?;
    for component in &project.components {
        resolve_component(component)?;
    }
    Ok(())
}
