/*
 * Copyright © 2026 Merel contributors
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::custom_error::{StoreError, TriplePosition};
use crate::dictionary::Dictionary;
use crate::index_manager::UnifiedIndex;
use crate::terms::{classify_text, Term};
use crate::triple::{EncodedTriple, Triple, TriplePattern};
use std::collections::{BTreeSet, HashMap};

/// Batches at least this large rebuild the permutation indexes in bulk
/// instead of inserting one triple at a time.
const BULK_BUILD_THRESHOLD: usize = 10_000;

/// In-memory triple set with dictionary encoding and six permutation
/// indexes. The set is ordered by encoded ids (first-seen term order),
/// which makes `match_pattern` deterministic for a given store history.
///
/// Not synchronized: single-writer, read-after-write usage is assumed,
/// callers wanting cross-thread access wrap the store in their own lock.
#[derive(Debug, Clone, Default)]
pub struct TripleStore {
    pub triples: BTreeSet<EncodedTriple>,
    pub dictionary: Dictionary,
    pub index: UnifiedIndex,
    pub prefixes: HashMap<String, String>,
}

impl TripleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a triple if not already present; returns whether it was newly
    /// added. A triple containing a variable is rejected before any
    /// store state (dictionary included) is touched.
    pub fn insert(&mut self, triple: Triple) -> Result<bool, StoreError> {
        validate(&triple)?;
        let encoded = self.encode(&triple);
        if !self.triples.insert(encoded) {
            return Ok(false);
        }
        self.index.insert(&encoded);
        Ok(true)
    }

    /// Insert a batch; observable behavior is identical to repeated
    /// `insert`, large batches rebuild the indexes in parallel. Returns
    /// the number of newly added triples. The whole batch is validated
    /// up front so a bad triple leaves the store untouched.
    pub fn extend(&mut self, triples: Vec<Triple>) -> Result<usize, StoreError> {
        for triple in &triples {
            validate(triple)?;
        }

        if triples.len() < BULK_BUILD_THRESHOLD {
            let mut added = 0;
            for triple in triples {
                if self.insert(triple)? {
                    added += 1;
                }
            }
            return Ok(added);
        }

        let mut added = 0;
        for triple in triples {
            let encoded = self.encode(&triple);
            if self.triples.insert(encoded) {
                added += 1;
            }
        }
        let all: Vec<EncodedTriple> = self.triples.iter().copied().collect();
        self.index.build_from_triples(&all);
        Ok(added)
    }

    /// Remove a triple if present; returns whether removal occurred.
    /// Dictionary entries are kept, ids stay stable for the session.
    pub fn remove(&mut self, triple: &Triple) -> bool {
        let encoded = match self.lookup(triple) {
            Some(encoded) => encoded,
            None => return false,
        };
        if !self.triples.remove(&encoded) {
            return false;
        }
        self.index.delete(&encoded);
        true
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.lookup(triple)
            .map_or(false, |encoded| self.triples.contains(&encoded))
    }

    /// Every stored triple whose terms equal the pattern's fixed
    /// positions, in id (first-seen) order. A fixed term the dictionary
    /// has never seen cannot match anything and short-circuits to an
    /// empty result without touching the dictionary.
    pub fn match_pattern(&self, pattern: &TriplePattern) -> Vec<Triple> {
        let positions = [
            &pattern.subject,
            &pattern.predicate,
            &pattern.object,
        ];
        let mut bound = [None, None, None];
        for (slot, term) in bound.iter_mut().zip(positions) {
            if !term.is_variable() {
                match self.dictionary.lookup(term) {
                    Some(id) => *slot = Some(id),
                    None => return Vec::new(),
                }
            }
        }
        let [s, p, o] = bound;

        let mut encoded = if s.is_none() && p.is_none() && o.is_none() {
            // Zero bound positions: walk the ordered set directly
            self.triples.iter().copied().collect()
        } else {
            let mut results = self.index.query(s, p, o);
            results.sort_unstable();
            results
        };

        encoded
            .drain(..)
            .filter_map(|e| self.dictionary.decode_triple(&e))
            .collect()
    }

    /// All stored triples in id order.
    pub fn iter(&self) -> impl Iterator<Item = Triple> + '_ {
        self.triples
            .iter()
            .filter_map(move |e| self.dictionary.decode_triple(e))
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn register_prefix(&mut self, prefix: &str, base_iri: &str) {
        self.prefixes
            .insert(prefix.to_string(), base_iri.to_string());
    }

    /// Classify raw text into a `Term` using the store's prefix
    /// registry (angle-bracket IRIs, quoted literals with `@lang` or
    /// `^^type`, prefixed names, `_:` blank nodes, bare text as a plain
    /// literal).
    pub fn resolve_text(&self, text: &str) -> Term {
        classify_text(text, &self.prefixes)
    }

    /// Text-level convenience insert: classify the three parts and
    /// insert the resulting triple. Text classifying to a variable
    /// (leading `?`) is rejected like any other variable.
    pub fn insert_parts(
        &mut self,
        subject: &str,
        predicate: &str,
        object: &str,
    ) -> Result<bool, StoreError> {
        let triple = Triple::new(
            self.resolve_text(subject),
            self.resolve_text(predicate),
            self.resolve_text(object),
        );
        self.insert(triple)
    }

    fn encode(&mut self, triple: &Triple) -> EncodedTriple {
        EncodedTriple {
            subject: self.dictionary.encode(&triple.subject),
            predicate: self.dictionary.encode(&triple.predicate),
            object: self.dictionary.encode(&triple.object),
        }
    }

    fn lookup(&self, triple: &Triple) -> Option<EncodedTriple> {
        Some(EncodedTriple {
            subject: self.dictionary.lookup(&triple.subject)?,
            predicate: self.dictionary.lookup(&triple.predicate)?,
            object: self.dictionary.lookup(&triple.object)?,
        })
    }
}

fn validate(triple: &Triple) -> Result<(), StoreError> {
    let positions = [
        (&triple.subject, TriplePosition::Subject),
        (&triple.predicate, TriplePosition::Predicate),
        (&triple.object, TriplePosition::Object),
    ];
    for (term, position) in positions {
        if term.is_variable() {
            return Err(StoreError::VariableInTriple { position });
        }
    }
    Ok(())
}
