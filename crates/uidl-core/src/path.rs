//! Locations inside a UIDL tree, used to make errors actionable.

use smallvec::SmallVec;
use std::fmt;

/// One step from a node to one of its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

/// A path from the component root, rendered as `root.children[1].node`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodePath(SmallVec<[PathSegment; 8]>);

impl NodePath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Path to a named part of the current node.
    pub fn field(&self, name: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.0.push(PathSegment::Field(name.into()));
        next
    }

    /// Path to an item of the current sequence.
    pub fn index(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.0.push(PathSegment::Index(index));
        next
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "root")?;
        for segment in &self.0 {
            match segment {
                PathSegment::Field(name) => write!(f, ".{}", name)?,
                PathSegment::Index(i) => write!(f, "[{}]", i)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let path = NodePath::root().field("children").index(1).field("node");
        assert_eq!(path.to_string(), "root.children[1].node");
        assert_eq!(NodePath::root().to_string(), "root");
    }
}
