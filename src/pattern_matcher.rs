/*
 * Copyright © 2026 Merel contributors
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::solution::SolutionMapping;
use crate::terms::Term;
use crate::triple::{Triple, TriplePattern};
use crate::triple_store::TripleStore;

/// Match one pattern against the store under an existing partial
/// mapping: variables already bound in `partial` are substituted first,
/// the grounded pattern is matched, and each candidate triple binds the
/// remaining variable positions. A variable occurring twice in one
/// pattern must receive equal terms or the candidate is rejected.
pub fn resolve(
    pattern: &TriplePattern,
    partial: &SolutionMapping,
    store: &TripleStore,
) -> Vec<SolutionMapping> {
    let grounded = ground(pattern, partial);
    let mut solutions = Vec::new();
    for triple in store.match_pattern(&grounded) {
        if let Some(extension) = bind_candidate(&grounded, &triple) {
            // Compatible by construction: extension only binds variables
            // that were unbound in `partial`.
            if let Some(merged) = partial.merge(&extension) {
                solutions.push(merged);
            }
        }
    }
    solutions
}

/// Substitute every pattern variable that `partial` already binds.
fn ground(pattern: &TriplePattern, partial: &SolutionMapping) -> TriplePattern {
    TriplePattern::new(
        ground_term(&pattern.subject, partial),
        ground_term(&pattern.predicate, partial),
        ground_term(&pattern.object, partial),
    )
}

fn ground_term(term: &Term, partial: &SolutionMapping) -> Term {
    match term {
        Term::Variable(name) => partial.get(name).cloned().unwrap_or_else(|| term.clone()),
        _ => term.clone(),
    }
}

/// Bind the remaining variable positions of `grounded` from `triple`,
/// rejecting the candidate when a repeated variable would receive two
/// different terms.
fn bind_candidate(grounded: &TriplePattern, triple: &Triple) -> Option<SolutionMapping> {
    let pairs = [
        (&grounded.subject, &triple.subject),
        (&grounded.predicate, &triple.predicate),
        (&grounded.object, &triple.object),
    ];
    let mut extension = SolutionMapping::new();
    for (pattern_term, value) in pairs {
        if let Term::Variable(name) = pattern_term {
            match extension.get(name) {
                Some(previous) if previous != value => return None,
                Some(_) => {}
                None => extension = extension.bind(name.clone(), value.clone()),
            }
        }
    }
    Some(extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(triples: &[(&str, &str, &str)]) -> TripleStore {
        let mut store = TripleStore::new();
        for (s, p, o) in triples {
            store
                .insert(Triple::new(Term::iri(*s), Term::iri(*p), Term::iri(*o)))
                .unwrap();
        }
        store
    }

    #[test]
    fn bound_variables_are_substituted_before_matching() {
        let store = store_with(&[("a", "knows", "b"), ("c", "knows", "d")]);
        let pattern = TriplePattern::new(Term::var("x"), Term::iri("knows"), Term::var("y"));
        let partial = SolutionMapping::new().bind("x", Term::iri("a"));

        let solutions = resolve(&pattern, &partial, &store);
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].get("y"), Some(&Term::iri("b")));
        assert_eq!(solutions[0].get("x"), Some(&Term::iri("a")));
    }

    #[test]
    fn repeated_variable_requires_equal_terms() {
        let store = store_with(&[("a", "knows", "a"), ("a", "knows", "b")]);
        let pattern = TriplePattern::new(Term::var("x"), Term::iri("knows"), Term::var("x"));

        let solutions = resolve(&pattern, &SolutionMapping::new(), &store);
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].get("x"), Some(&Term::iri("a")));
    }

    #[test]
    fn no_candidates_yield_empty_vec() {
        let store = store_with(&[("a", "knows", "b")]);
        let pattern = TriplePattern::new(Term::var("x"), Term::iri("likes"), Term::var("y"));
        assert!(resolve(&pattern, &SolutionMapping::new(), &store).is_empty());
    }
}
