/*
 * Copyright © 2026 Merel contributors
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::terms::Term;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of query results: variable name -> bound term. Only bound
/// variables are present; an unbound variable is simply absent, never a
/// null entry. Mappings are never mutated after construction, extension
/// produces a new value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionMapping {
    bindings: BTreeMap<String, Term>,
}

impl SolutionMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume this mapping and return a copy extended with one binding.
    pub fn bind(mut self, name: impl Into<String>, term: Term) -> Self {
        self.bindings.insert(name.into(), term);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Term> {
        self.bindings.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// All bound variable names for this row.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Term)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Two mappings are compatible when every variable bound in both is
    /// bound to an equal term.
    pub fn is_compatible(&self, other: &SolutionMapping) -> bool {
        self.bindings
            .iter()
            .all(|(name, term)| other.get(name).map_or(true, |t| t == term))
    }

    /// Union of bindings if the two mappings are compatible.
    pub fn merge(&self, other: &SolutionMapping) -> Option<SolutionMapping> {
        if !self.is_compatible(other) {
            return None;
        }
        let mut bindings = self.bindings.clone();
        for (name, term) in &other.bindings {
            bindings.insert(name.clone(), term.clone());
        }
        Some(SolutionMapping { bindings })
    }

    /// Restrict to the named variables; names never bound here simply
    /// stay absent in the projection.
    pub fn project(&self, names: &[String]) -> SolutionMapping {
        let bindings = names
            .iter()
            .filter_map(|name| {
                self.bindings
                    .get(name)
                    .map(|term| (name.clone(), term.clone()))
            })
            .collect();
        SolutionMapping { bindings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_unions_compatible_bindings() {
        let a = SolutionMapping::new().bind("x", Term::iri("http://a"));
        let b = SolutionMapping::new()
            .bind("x", Term::iri("http://a"))
            .bind("y", Term::literal("1"));
        let merged = a.merge(&b).unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get("y"), Some(&Term::literal("1")));
    }

    #[test]
    fn merge_rejects_conflicting_bindings() {
        let a = SolutionMapping::new().bind("x", Term::iri("http://a"));
        let b = SolutionMapping::new().bind("x", Term::iri("http://b"));
        assert!(a.merge(&b).is_none());
    }

    #[test]
    fn project_drops_unbound_names_silently() {
        let m = SolutionMapping::new().bind("x", Term::literal("v"));
        let p = m.project(&["x".to_string(), "missing".to_string()]);
        assert_eq!(p.len(), 1);
        assert!(!p.contains("missing"));
    }
}
