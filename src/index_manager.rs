/*
 * Copyright © 2026 Merel contributors
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::triple::EncodedTriple;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

type Permutation = HashMap<u32, HashMap<u32, HashSet<u32>>>;

/// The six index permutations over encoded triples, so that any
/// combination of bound positions is answered by one map walk instead of
/// a full scan. Kept eagerly in sync with the triple set on every
/// insert/delete; `build_from_triples` rebuilds all six in bulk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnifiedIndex {
    pub spo: Permutation,
    pub pos: Permutation,
    pub osp: Permutation,
    pub pso: Permutation,
    pub ops: Permutation,
    pub sop: Permutation,
}

impl UnifiedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a single triple into all six indexes
    pub fn insert(&mut self, triple: &EncodedTriple) -> bool {
        let EncodedTriple {
            subject: s,
            predicate: p,
            object: o,
        } = *triple;
        if let Some(pred_map) = self.spo.get(&s) {
            if let Some(objects) = pred_map.get(&p) {
                if objects.contains(&o) {
                    return false; // triple already stored
                }
            }
        }
        self.spo.entry(s).or_default().entry(p).or_default().insert(o);
        self.pos.entry(p).or_default().entry(o).or_default().insert(s);
        self.osp.entry(o).or_default().entry(s).or_default().insert(p);
        self.pso.entry(p).or_default().entry(s).or_default().insert(o);
        self.ops.entry(o).or_default().entry(p).or_default().insert(s);
        self.sop.entry(s).or_default().entry(o).or_default().insert(p);
        true
    }

    /// Delete a single triple from all six indexes
    pub fn delete(&mut self, triple: &EncodedTriple) -> bool {
        let EncodedTriple {
            subject: s,
            predicate: p,
            object: o,
        } = *triple;

        let exists = self
            .spo
            .get(&s)
            .and_then(|pred_map| pred_map.get(&p))
            .map_or(false, |objects| objects.contains(&o));

        if !exists {
            return false;
        }

        remove_from_index(&mut self.spo, s, p, o);
        remove_from_index(&mut self.pos, p, o, s);
        remove_from_index(&mut self.osp, o, s, p);
        remove_from_index(&mut self.pso, p, s, o);
        remove_from_index(&mut self.ops, o, p, s);
        remove_from_index(&mut self.sop, s, o, p);
        true
    }

    /// Bulk-build the index from a list of triples: partial indexes are
    /// built per chunk in parallel, then merged sequentially.
    pub fn build_from_triples(&mut self, triples: &[EncodedTriple]) {
        use rayon::prelude::*;

        self.clear();

        if triples.is_empty() {
            return;
        }

        let num_threads = rayon::current_num_threads();
        let chunk_size = (triples.len() / num_threads).max(10_000);

        let partial_indexes: Vec<UnifiedIndex> = triples
            .par_chunks(chunk_size)
            .map(|chunk| {
                let mut local_index = UnifiedIndex::new();
                for triple in chunk {
                    local_index.insert(triple);
                }
                local_index
            })
            .collect();

        for partial_index in partial_indexes {
            self.merge_from(partial_index);
        }
    }

    fn merge_from(&mut self, other: UnifiedIndex) {
        merge_permutation(&mut self.spo, other.spo);
        merge_permutation(&mut self.pos, other.pos);
        merge_permutation(&mut self.osp, other.osp);
        merge_permutation(&mut self.pso, other.pso);
        merge_permutation(&mut self.ops, other.ops);
        merge_permutation(&mut self.sop, other.sop);
    }

    /// Query the index; `None` positions are unbound. Result order is
    /// unspecified here, callers sort by id for determinism.
    pub fn query(&self, s: Option<u32>, p: Option<u32>, o: Option<u32>) -> Vec<EncodedTriple> {
        let mut results = Vec::new();

        match (s, p, o) {
            // Fully bound
            (Some(ss), Some(pp), Some(oo)) => {
                if let Some(pred_map) = self.spo.get(&ss) {
                    if let Some(objects) = pred_map.get(&pp) {
                        if objects.contains(&oo) {
                            results.push(EncodedTriple {
                                subject: ss,
                                predicate: pp,
                                object: oo,
                            });
                        }
                    }
                }
            }
            // (S, P, -)
            (Some(ss), Some(pp), None) => {
                if let Some(pred_map) = self.spo.get(&ss) {
                    if let Some(objects) = pred_map.get(&pp) {
                        for &obj in objects {
                            results.push(EncodedTriple {
                                subject: ss,
                                predicate: pp,
                                object: obj,
                            });
                        }
                    }
                }
            }
            // (S, -, O)
            (Some(ss), None, Some(oo)) => {
                if let Some(obj_map) = self.sop.get(&ss) {
                    if let Some(predicates) = obj_map.get(&oo) {
                        for &pred in predicates {
                            results.push(EncodedTriple {
                                subject: ss,
                                predicate: pred,
                                object: oo,
                            });
                        }
                    }
                }
            }
            // (-, P, O)
            (None, Some(pp), Some(oo)) => {
                if let Some(obj_map) = self.pos.get(&pp) {
                    if let Some(subjects) = obj_map.get(&oo) {
                        for &subj in subjects {
                            results.push(EncodedTriple {
                                subject: subj,
                                predicate: pp,
                                object: oo,
                            });
                        }
                    }
                }
            }
            // (S, -, -)
            (Some(ss), None, None) => {
                if let Some(pred_map) = self.spo.get(&ss) {
                    for (&pred, objects) in pred_map {
                        for &obj in objects {
                            results.push(EncodedTriple {
                                subject: ss,
                                predicate: pred,
                                object: obj,
                            });
                        }
                    }
                }
            }
            // (-, P, -)
            (None, Some(pp), None) => {
                if let Some(subj_map) = self.pso.get(&pp) {
                    for (&subj, objects) in subj_map {
                        for &obj in objects {
                            results.push(EncodedTriple {
                                subject: subj,
                                predicate: pp,
                                object: obj,
                            });
                        }
                    }
                }
            }
            // (-, -, O)
            (None, None, Some(oo)) => {
                if let Some(pred_map) = self.ops.get(&oo) {
                    for (&pred, subjects) in pred_map {
                        for &subj in subjects {
                            results.push(EncodedTriple {
                                subject: subj,
                                predicate: pred,
                                object: oo,
                            });
                        }
                    }
                }
            }
            // (-, -, -) => all
            (None, None, None) => {
                for (&subj, pred_map) in &self.spo {
                    for (&pred, objects) in pred_map {
                        for &obj in objects {
                            results.push(EncodedTriple {
                                subject: subj,
                                predicate: pred,
                                object: obj,
                            });
                        }
                    }
                }
            }
        }

        results
    }

    /// Clear all data in the indexes
    pub fn clear(&mut self) {
        self.spo.clear();
        self.pos.clear();
        self.osp.clear();
        self.pso.clear();
        self.ops.clear();
        self.sop.clear();
    }
}

fn remove_from_index(index: &mut Permutation, a: u32, b: u32, c: u32) {
    if let Some(inner_map) = index.get_mut(&a) {
        if let Some(set) = inner_map.get_mut(&b) {
            set.remove(&c);
            if set.is_empty() {
                inner_map.remove(&b);
            }
        }
        if inner_map.is_empty() {
            index.remove(&a);
        }
    }
}

fn merge_permutation(dst: &mut Permutation, src: Permutation) {
    for (a, inner) in src {
        let dst_inner = dst.entry(a).or_default();
        for (b, set) in inner {
            dst_inner.entry(b).or_default().extend(set);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enc(s: u32, p: u32, o: u32) -> EncodedTriple {
        EncodedTriple {
            subject: s,
            predicate: p,
            object: o,
        }
    }

    #[test]
    fn insert_deduplicates_across_permutations() {
        let mut index = UnifiedIndex::new();
        assert!(index.insert(&enc(0, 1, 2)));
        assert!(!index.insert(&enc(0, 1, 2)));
        assert_eq!(index.query(Some(0), None, None).len(), 1);
        assert_eq!(index.query(None, Some(1), None).len(), 1);
        assert_eq!(index.query(None, None, Some(2)).len(), 1);
    }

    #[test]
    fn delete_prunes_empty_branches() {
        let mut index = UnifiedIndex::new();
        index.insert(&enc(0, 1, 2));
        assert!(index.delete(&enc(0, 1, 2)));
        assert!(!index.delete(&enc(0, 1, 2)));
        assert!(index.spo.is_empty());
        assert!(index.ops.is_empty());
    }

    #[test]
    fn bulk_build_matches_incremental_insert() {
        let triples: Vec<EncodedTriple> =
            (0..200).map(|i| enc(i % 10, i % 7, i)).collect();

        let mut incremental = UnifiedIndex::new();
        for t in &triples {
            incremental.insert(t);
        }
        let mut bulk = UnifiedIndex::new();
        bulk.build_from_triples(&triples);

        let mut a = incremental.query(None, None, None);
        let mut b = bulk.query(None, None, None);
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b);
    }
}
