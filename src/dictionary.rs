/*
 * Copyright © 2026 Merel contributors
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::terms::Term;
use crate::triple::{EncodedTriple, Triple};
use std::collections::HashMap;

// Dictionary for encoding and decoding terms
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Dictionary {
    term_to_id: HashMap<Term, u32>,
    id_to_term: HashMap<u32, Term>,
    next_id: u32,
}

impl Dictionary {
    pub fn new() -> Self {
        Dictionary {
            term_to_id: HashMap::new(),
            id_to_term: HashMap::new(),
            next_id: 0,
        }
    }

    pub fn encode(&mut self, term: &Term) -> u32 {
        if let Some(&id) = self.term_to_id.get(term) {
            id
        } else {
            let id = self.next_id;
            self.term_to_id.insert(term.clone(), id);
            self.id_to_term.insert(id, term.clone());
            self.next_id += 1;
            id
        }
    }

    /// Non-inserting lookup. A fixed pattern term that was never stored
    /// has no id and therefore cannot match anything.
    pub fn lookup(&self, term: &Term) -> Option<u32> {
        self.term_to_id.get(term).copied()
    }

    pub fn decode(&self, id: u32) -> Option<&Term> {
        self.id_to_term.get(&id)
    }

    pub fn decode_triple(&self, encoded: &EncodedTriple) -> Option<Triple> {
        let subject = self.decode(encoded.subject)?.clone();
        let predicate = self.decode(encoded.predicate)?.clone();
        let object = self.decode(encoded.object)?.clone();
        Some(Triple::new(subject, predicate, object))
    }

    pub fn len(&self) -> usize {
        self.term_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.term_to_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_is_idempotent_and_first_seen_ordered() {
        let mut dict = Dictionary::new();
        let a = dict.encode(&Term::iri("http://a"));
        let b = dict.encode(&Term::literal("b"));
        assert_eq!(dict.encode(&Term::iri("http://a")), a);
        assert!(a < b);
        assert_eq!(dict.decode(a), Some(&Term::iri("http://a")));
    }

    #[test]
    fn lookup_never_inserts() {
        let dict = Dictionary::new();
        assert_eq!(dict.lookup(&Term::iri("http://a")), None);
        assert!(dict.is_empty());
    }
}
