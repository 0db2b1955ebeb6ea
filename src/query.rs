/*
 * Copyright © 2026 Merel contributors
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::solution::SolutionMapping;
use crate::triple::{Triple, TriplePattern};

/// What a SELECT keeps from each solution: everything (`SELECT *`) or a
/// named subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    All,
    Variables(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    pub patterns: Vec<TriplePattern>,
    pub projection: Projection,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructQuery {
    pub patterns: Vec<TriplePattern>,
    pub template: Vec<TriplePattern>,
    pub limit: Option<usize>,
}

/// Patterns are evaluated in the order given, there is no planner. That
/// keeps short-circuit timing and result order predictable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Select(SelectQuery),
    Construct(ConstructQuery),
}

impl Query {
    pub fn patterns(&self) -> &[TriplePattern] {
        match self {
            Query::Select(q) => &q.patterns,
            Query::Construct(q) => &q.patterns,
        }
    }
}

/// SELECT yields solution rows, CONSTRUCT yields instantiated triples
/// in generation order, duplicates included.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResults {
    Solutions(Vec<SolutionMapping>),
    Graph(Vec<Triple>),
}

impl QueryResults {
    pub fn len(&self) -> usize {
        match self {
            QueryResults::Solutions(rows) => rows.len(),
            QueryResults::Graph(triples) => triples.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_solutions(&self) -> Option<&[SolutionMapping]> {
        match self {
            QueryResults::Solutions(rows) => Some(rows),
            QueryResults::Graph(_) => None,
        }
    }

    pub fn as_graph(&self) -> Option<&[Triple]> {
        match self {
            QueryResults::Solutions(_) => None,
            QueryResults::Graph(triples) => Some(triples),
        }
    }
}
