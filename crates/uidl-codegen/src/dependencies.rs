//! The dependency table: imports the generated code needs, keyed by the
//! name each one is bound to in the output scope.

use convert_case::{Case, Casing};
use indexmap::{IndexMap, IndexSet};
use tracing::debug;
use uidl_core::{Dependency, DependencyType};

/// Insertion-ordered map from bound name to import.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DependencyTable {
    entries: IndexMap<String, Dependency>,
    /// Names declared by the generated module itself; never bound to an import.
    reserved: IndexSet<String>,
}

impl DependencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `dependency` under `name` and return the name it ended up with.
    ///
    /// An unbound name, or one already bound to the same import, is returned
    /// unchanged. A clash with a different import derives a new name from the
    /// dependency path (`../components/fancy` + `Button` gives
    /// `ComponentsFancyButton`), adding a numeric suffix while that is taken
    /// too. Existing bindings are never modified.
    pub fn register(&mut self, name: &str, dependency: Dependency) -> String {
        match self.entries.get(name) {
            None if !self.reserved.contains(name) => {
                self.entries.insert(name.to_string(), dependency);
                return name.to_string();
            }
            Some(existing) if existing.same_import(&dependency) => return name.to_string(),
            _ => {}
        }

        let base = disambiguated_name(&dependency.path, name);
        let mut candidate = base.clone();
        let mut suffix = 2;
        loop {
            match self.entries.get(&candidate) {
                None if !self.reserved.contains(&candidate) => break,
                Some(existing) if existing.same_import(&dependency) => return candidate,
                _ => {
                    candidate = format!("{base}{suffix}");
                    suffix += 1;
                }
            }
        }

        debug!(requested = name, renamed = %candidate, path = %dependency.path, "Renaming clashing import");
        let mut renamed = dependency;
        if renamed.meta.original_name.is_none() {
            renamed.meta.original_name = Some(name.to_string());
        }
        self.entries.insert(candidate.clone(), renamed);
        candidate
    }

    /// Claim `name` for a local declaration so imports bind elsewhere.
    ///
    /// Returns `false` when an import already holds the name.
    pub fn reserve(&mut self, name: &str) -> bool {
        if self.entries.contains_key(name) {
            return false;
        }
        self.reserved.insert(name.to_string());
        true
    }

    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.contains(name)
    }

    /// Fold another table's imports into this one with the same binding
    /// rules. Reservations stay local to each table.
    pub fn merge(&mut self, other: &DependencyTable) {
        for (name, dependency) in other.iter() {
            self.register(name, dependency.clone());
        }
    }

    pub fn get(&self, name: &str) -> Option<&Dependency> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Dependency)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Versions of the published packages, for the project manifest.
    ///
    /// Packages without a version are listed as `latest`.
    pub fn package_versions(&self) -> IndexMap<String, String> {
        let mut versions = IndexMap::new();
        for dependency in self.entries.values() {
            if dependency.dependency_type != DependencyType::Package {
                continue;
            }
            let version = dependency.version.clone().unwrap_or_else(|| "latest".to_string());
            versions.entry(package_name(&dependency.path)).or_insert(version);
        }
        versions
    }
}

/// `PascalCase(path segments) + name`.
fn disambiguated_name(path: &str, name: &str) -> String {
    let words = path
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    format!("{}{}", words.to_case(Case::Pascal), name)
}

/// The package an import path belongs to: `preact/hooks` is part of
/// `preact`, `@scope/pkg/sub` of `@scope/pkg`.
fn package_name(path: &str) -> String {
    let take = if path.starts_with('@') { 2 } else { 1 };
    path.split('/').take(take).collect::<Vec<_>>().join("/")
}
