//! Deterministic keys for elements that lack one.

use super::{visit_elements, visit_elements_mut};
use crate::error::Result;
use crate::pipeline::{GenerationStructure, Plugin};
use convert_case::{Case, Casing};
use std::collections::{HashMap, HashSet};

/// Assigns `<elementType><n>` keys so later plugins can find every element
/// in the nodes lookup. Keys already present are kept and never reused.
#[derive(Debug, Default)]
pub struct UidlNormalizer;

impl UidlNormalizer {
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for UidlNormalizer {
    fn name(&self) -> &'static str {
        "uidl-normalizer"
    }

    fn run(&self, mut structure: GenerationStructure) -> Result<GenerationStructure> {
        let mut used = HashSet::new();
        visit_elements(&structure.uidl.node, &mut |element| {
            if !element.key.is_empty() {
                used.insert(element.key.clone());
            }
        });

        let mut counters: HashMap<String, usize> = HashMap::new();
        visit_elements_mut(&mut structure.uidl.node, &mut |element| {
            if !element.key.is_empty() {
                return;
            }
            let base = element.element_type.to_case(Case::Camel);
            let counter = counters.entry(base.clone()).or_insert(0);
            let key = loop {
                *counter += 1;
                let candidate = format!("{base}{counter}");
                if !used.contains(&candidate) {
                    break candidate;
                }
            };
            used.insert(key.clone());
            element.key = key;
        });

        Ok(structure)
    }
}
