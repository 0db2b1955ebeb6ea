/*
 * Copyright © 2026 Merel contributors
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::terms::Term;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A subject-predicate-object statement. Identity is structural: two
/// triples with equal terms are the same fact, and the store collapses
/// them on insert.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Triple {
            subject,
            predicate,
            object,
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

/// Same shape as `Triple`, but any position may hold a `Variable`.
/// Fixed positions must equal the stored triple's term for a match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriplePattern {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
}

impl TriplePattern {
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        TriplePattern {
            subject,
            predicate,
            object,
        }
    }

    pub fn terms(&self) -> [&Term; 3] {
        [&self.subject, &self.predicate, &self.object]
    }

    /// Names of the variables occurring in this pattern, duplicates included.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.terms().into_iter().filter_map(|t| t.as_variable())
    }
}

impl From<Triple> for TriplePattern {
    fn from(triple: Triple) -> Self {
        TriplePattern::new(triple.subject, triple.predicate, triple.object)
    }
}

/// A triple with its terms replaced by dictionary ids. This is what the
/// store and the permutation indexes actually hold; ids are assigned in
/// first-seen order, so ordering encoded triples reproduces a stable
/// insertion-derived order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EncodedTriple {
    pub subject: u32,
    pub predicate: u32,
    pub object: u32,
}
