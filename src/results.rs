/*
 * Copyright © 2026 Merel contributors
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::query::QueryResults;
use crate::terms::{LiteralTag, Term};
use serde_json::{json, Map, Value};
use std::collections::BTreeSet;

impl QueryResults {
    /// Render SELECT results in the W3C SPARQL 1.1 results-JSON shape
    /// (`head.vars` + `results.bindings`), and CONSTRUCT results as an
    /// array of subject/predicate/object objects. `head.vars` lists the
    /// union of variables bound anywhere in the result, sorted.
    pub fn to_json(&self) -> Value {
        match self {
            QueryResults::Solutions(rows) => {
                let vars: BTreeSet<&str> =
                    rows.iter().flat_map(|row| row.variables()).collect();
                let bindings: Vec<Value> = rows
                    .iter()
                    .map(|row| {
                        let mut obj = Map::new();
                        for (name, term) in row.iter() {
                            obj.insert(name.to_string(), term_json(term));
                        }
                        Value::Object(obj)
                    })
                    .collect();
                json!({
                    "head": { "vars": vars.into_iter().collect::<Vec<_>>() },
                    "results": { "bindings": bindings }
                })
            }
            QueryResults::Graph(triples) => {
                let items: Vec<Value> = triples
                    .iter()
                    .map(|t| {
                        json!({
                            "subject": term_json(&t.subject),
                            "predicate": term_json(&t.predicate),
                            "object": term_json(&t.object),
                        })
                    })
                    .collect();
                Value::Array(items)
            }
        }
    }
}

fn term_json(term: &Term) -> Value {
    match term {
        Term::Iri(iri) => json!({ "type": "uri", "value": iri }),
        Term::Literal(value, None) => json!({ "type": "literal", "value": value }),
        Term::Literal(value, Some(LiteralTag::Language(lang))) => {
            json!({ "type": "literal", "value": value, "xml:lang": lang })
        }
        Term::Literal(value, Some(LiteralTag::Datatype(datatype))) => {
            json!({ "type": "literal", "value": value, "datatype": datatype })
        }
        Term::BlankNode(id) => json!({ "type": "bnode", "value": id }),
        // Solutions only bind ground terms; render a stray variable by name
        Term::Variable(name) => json!({ "type": "literal", "value": format!("?{}", name) }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solution::SolutionMapping;
    use crate::triple::Triple;

    #[test]
    fn select_json_lists_union_of_bound_vars() {
        let rows = vec![
            SolutionMapping::new().bind("n", Term::literal("Alice")),
            SolutionMapping::new()
                .bind("n", Term::literal("Bob"))
                .bind("p", Term::iri("http://example.org/b")),
        ];
        let value = QueryResults::Solutions(rows).to_json();
        assert_eq!(value["head"]["vars"], json!(["n", "p"]));
        assert_eq!(value["results"]["bindings"][0]["n"]["value"], "Alice");
        assert_eq!(value["results"]["bindings"][1]["p"]["type"], "uri");
        // Unbound variable is absent, not null
        assert!(value["results"]["bindings"][0].get("p").is_none());
    }

    #[test]
    fn graph_json_is_an_array_of_term_objects() {
        let graph = vec![Triple::new(
            Term::iri("http://a"),
            Term::iri("http://p"),
            Term::lang_literal("hi", "en"),
        )];
        let value = QueryResults::Graph(graph).to_json();
        assert_eq!(value[0]["subject"]["type"], "uri");
        assert_eq!(value[0]["object"]["xml:lang"], "en");
    }
}
