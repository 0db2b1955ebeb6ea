#[cfg(test)]
mod tests {
    use merel::parser::*;
    use merel::query::{Projection, Query};
    use merel::terms::{Term, RDF_TYPE};
    use std::collections::HashMap;

    #[test]
    fn test_identifier_parsing() {
        let result = identifier("person_name");
        assert_eq!(result, Ok(("", "person_name")));

        let result = identifier("");
        assert!(result.is_err());

        let result = identifier("!invalid");
        assert!(result.is_err());
    }

    #[test]
    fn test_variable_parsing() {
        let result = variable("?person");
        assert_eq!(result, Ok(("", "person")));

        let result = variable("person");
        assert!(result.is_err());
    }

    #[test]
    fn test_iri_and_prefixed_name_parsing() {
        let result = iri_ref("<http://example.org/a>");
        assert_eq!(result, Ok(("", "http://example.org/a")));

        let result = prefixed_name("ex:worksAt");
        assert_eq!(result, Ok(("", ("ex", "worksAt"))));

        let result = prefixed_name(":worksAt");
        assert_eq!(result, Ok(("", ("", "worksAt"))));
    }

    #[test]
    fn test_literal_parsing() {
        let (_, plain) = literal("\"hello\"").unwrap();
        assert_eq!(
            plain,
            RawTerm::Literal {
                value: "hello",
                lang: None,
                datatype: None
            }
        );

        let (_, tagged) = literal("\"bonjour\"@fr").unwrap();
        assert_eq!(
            tagged,
            RawTerm::Literal {
                value: "bonjour",
                lang: Some("fr"),
                datatype: None
            }
        );

        let (_, typed) = literal("\"42\"^^<http://t>").unwrap();
        assert_eq!(
            typed,
            RawTerm::Literal {
                value: "42",
                lang: None,
                datatype: Some(RawIri::Full("http://t"))
            }
        );
    }

    #[test]
    fn test_blank_node_parsing() {
        assert_eq!(blank_node("_:b0"), Ok(("", "b0")));
        assert!(blank_node("b0").is_err());
    }

    #[test]
    fn select_query_with_prefixes_and_semicolon_list() {
        let query = parse_query(
            r#"
            PREFIX ex: <http://example.org/>
            SELECT ?name ?age WHERE {
                ?p a ex:Person .
                ?p ex:name ?name ;
                   ex:age ?age
            }
            "#,
        )
        .unwrap();

        let select = match query {
            Query::Select(q) => q,
            _ => panic!("expected SELECT"),
        };
        assert_eq!(
            select.projection,
            Projection::Variables(vec!["name".to_string(), "age".to_string()])
        );
        assert_eq!(select.patterns.len(), 3);
        // `a` expands to rdf:type
        assert_eq!(select.patterns[0].predicate, Term::iri(RDF_TYPE));
        assert_eq!(
            select.patterns[1].predicate,
            Term::iri("http://example.org/name")
        );
        assert_eq!(select.patterns[2].subject, Term::var("p"));
    }

    #[test]
    fn select_star_and_limit() {
        let query = parse_query("SELECT * WHERE { ?s ?p ?o . } LIMIT 10").unwrap();
        let select = match query {
            Query::Select(q) => q,
            _ => panic!("expected SELECT"),
        };
        assert_eq!(select.projection, Projection::All);
        assert_eq!(select.limit, Some(10));
    }

    #[test]
    fn construct_query_parses_template_and_where() {
        let query = parse_query(
            r#"
            PREFIX ex: <http://example.org/>
            CONSTRUCT { ?p ex:label ?name }
            WHERE { ?p ex:name ?name }
            LIMIT 5
            "#,
        )
        .unwrap();

        let construct = match query {
            Query::Construct(q) => q,
            _ => panic!("expected CONSTRUCT"),
        };
        assert_eq!(construct.template.len(), 1);
        assert_eq!(construct.patterns.len(), 1);
        assert_eq!(construct.limit, Some(5));
        assert_eq!(
            construct.template[0].predicate,
            Term::iri("http://example.org/label")
        );
    }

    #[test]
    fn literals_and_blank_nodes_in_patterns() {
        let query = parse_query(
            r#"SELECT ?s WHERE { ?s <http://example.org/note> "chat"@fr . _:b0 <http://example.org/p> "42"^^<http://t> }"#,
        )
        .unwrap();
        let select = match query {
            Query::Select(q) => q,
            _ => panic!("expected SELECT"),
        };
        assert_eq!(select.patterns[0].object, Term::lang_literal("chat", "fr"));
        assert_eq!(select.patterns[1].subject, Term::blank("b0"));
        assert_eq!(
            select.patterns[1].object,
            Term::typed_literal("42", "http://t")
        );
    }

    #[test]
    fn unknown_prefix_is_a_parse_error() {
        let err = parse_query("SELECT ?s WHERE { ?s nope:thing ?o }").unwrap_err();
        assert!(err.contains("Unknown prefix"));
        assert!(err.contains("nope"));
    }

    #[test]
    fn external_prefixes_fill_in_for_missing_declarations() {
        let mut registry = HashMap::new();
        registry.insert("ex".to_string(), "http://example.org/".to_string());

        let query =
            parse_query_with_prefixes("SELECT ?s WHERE { ?s ex:name ?n }", &registry).unwrap();
        let select = match query {
            Query::Select(q) => q,
            _ => panic!("expected SELECT"),
        };
        assert_eq!(
            select.patterns[0].predicate,
            Term::iri("http://example.org/name")
        );
    }

    #[test]
    fn in_query_declaration_wins_over_external_registry() {
        let mut registry = HashMap::new();
        registry.insert("ex".to_string(), "http://stale.example/".to_string());

        let query = parse_query_with_prefixes(
            "PREFIX ex: <http://example.org/> SELECT ?s WHERE { ?s ex:name ?n }",
            &registry,
        )
        .unwrap();
        let select = match query {
            Query::Select(q) => q,
            _ => panic!("expected SELECT"),
        };
        assert_eq!(
            select.patterns[0].predicate,
            Term::iri("http://example.org/name")
        );
    }

    #[test]
    fn missing_where_produces_a_named_error() {
        let err = parse_query("SELECT ?x { ?x ?p ?o }").unwrap_err();
        assert!(err.contains("WHERE"));
    }

    #[test]
    fn unbalanced_braces_produce_a_named_error() {
        let err = parse_query("SELECT ?x WHERE { ?x ?p ?o").unwrap_err();
        assert!(err.contains("brace"));
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        let err = parse_query("SELECT ?x WHERE { ?x ?p ?o } garbage").unwrap_err();
        assert!(err.contains("trailing"));
    }
}
