/*
 * Copyright © 2026 Merel contributors
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

#[cfg(not(test))]
use log::debug; // Use log crate when building application
#[cfg(test)]
use std::println as debug;

use crate::custom_error::StoreError;
use crate::parser::parse_query_with_prefixes;
use crate::pattern_matcher;
use crate::query::{ConstructQuery, Projection, Query, QueryResults, SelectQuery};
use crate::solution::SolutionMapping;
use crate::terms::Term;
use crate::triple::{Triple, TriplePattern};
use crate::triple_store::TripleStore;

/// Execute a typed query against a caller-owned store. Pure and
/// synchronous: a single fold over the patterns, no state between calls.
pub fn execute(query: &Query, store: &TripleStore) -> QueryResults {
    match query {
        Query::Select(select) => execute_select(select, store),
        Query::Construct(construct) => execute_construct(construct, store),
    }
}

fn execute_select(query: &SelectQuery, store: &TripleStore) -> QueryResults {
    let mut solutions = join(&query.patterns, store);
    apply_limit(&mut solutions, query.limit);
    let rows = match &query.projection {
        Projection::All => solutions,
        Projection::Variables(names) => solutions
            .iter()
            .map(|mapping| mapping.project(names))
            .collect(),
    };
    QueryResults::Solutions(rows)
}

fn execute_construct(query: &ConstructQuery, store: &TripleStore) -> QueryResults {
    let mut solutions = join(&query.patterns, store);
    apply_limit(&mut solutions, query.limit);
    let mut graph = Vec::new();
    for mapping in &solutions {
        for pattern in &query.template {
            if let Some(triple) = instantiate(pattern, mapping) {
                graph.push(triple);
            }
        }
    }
    QueryResults::Graph(graph)
}

/// Left-deep nested-loop join: thread every current mapping through the
/// next pattern, in the order the query gives them. An empty
/// intermediate result short-circuits the remaining patterns.
fn join(patterns: &[TriplePattern], store: &TripleStore) -> Vec<SolutionMapping> {
    let mut solutions = vec![SolutionMapping::new()];
    for (position, pattern) in patterns.iter().enumerate() {
        let mut next = Vec::new();
        for mapping in &solutions {
            next.extend(pattern_matcher::resolve(pattern, mapping, store));
        }
        debug!("pattern {}: {} -> {} rows", position, solutions.len(), next.len());
        if next.is_empty() {
            debug!("join short-circuit after pattern {}", position);
            return Vec::new();
        }
        solutions = next;
    }
    solutions
}

/// Instantiate one template pattern under a mapping. A template variable
/// the mapping does not bind drops the whole instantiated triple; this
/// is deliberate CONSTRUCT behavior, not an error.
fn instantiate(pattern: &TriplePattern, mapping: &SolutionMapping) -> Option<Triple> {
    Some(Triple::new(
        instantiate_term(&pattern.subject, mapping)?,
        instantiate_term(&pattern.predicate, mapping)?,
        instantiate_term(&pattern.object, mapping)?,
    ))
}

fn instantiate_term(term: &Term, mapping: &SolutionMapping) -> Option<Term> {
    match term {
        Term::Variable(name) => mapping.get(name).cloned(),
        _ => Some(term.clone()),
    }
}

fn apply_limit(solutions: &mut Vec<SolutionMapping>, limit: Option<usize>) {
    if let Some(limit) = limit {
        solutions.truncate(limit);
    }
}

/// Facade owning a store, for callers that feed it raw text: vault
/// ingestion goes through `insert_parts`/`load`, queries arrive as
/// SPARQL strings and may use the store's registered prefixes.
#[derive(Debug, Clone, Default)]
pub struct QueryEngine {
    store: TripleStore,
}

impl QueryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_prefix(&mut self, prefix: &str, base_iri: &str) {
        self.store.register_prefix(prefix, base_iri);
    }

    pub fn insert(&mut self, triple: Triple) -> Result<bool, StoreError> {
        self.store.insert(triple)
    }

    /// Add a single triple from raw text parts.
    pub fn insert_parts(
        &mut self,
        subject: &str,
        predicate: &str,
        object: &str,
    ) -> Result<bool, StoreError> {
        self.store.insert_parts(subject, predicate, object)
    }

    /// Bulk-load a batch of triples; returns how many were new.
    pub fn load(&mut self, triples: Vec<Triple>) -> Result<usize, StoreError> {
        self.store.extend(triples)
    }

    /// Parse and execute a SPARQL query string. In-query PREFIX
    /// declarations take precedence over the store's registry.
    pub fn query(&self, sparql: &str) -> Result<QueryResults, String> {
        let query = parse_query_with_prefixes(sparql, &self.store.prefixes)?;
        Ok(execute(&query, &self.store))
    }

    /// Direct access to the underlying store (for advanced operations)
    pub fn store(&self) -> &TripleStore {
        &self.store
    }

    /// Mutable access to the underlying store (for advanced operations)
    pub fn store_mut(&mut self) -> &mut TripleStore {
        &mut self.store
    }
}
