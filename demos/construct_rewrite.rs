use merel::query_engine::QueryEngine;

fn main() {
    let mut engine = QueryEngine::new();
    engine.register_prefix("vault", "vault://notes/");
    engine.register_prefix("ex", "http://example.org/schema/");

    let links = [
        ("vault:zettelkasten", "ex:linksTo", "vault:luhmann"),
        ("vault:zettelkasten", "ex:linksTo", "vault:inbox"),
        ("vault:luhmann", "ex:linksTo", "vault:inbox"),
    ];
    for (s, p, o) in links {
        engine.insert_parts(s, p, o).expect("link triples are ground");
    }

    // Rewrite forward links into backlinks
    let sparql = r#"
        CONSTRUCT { ?target ex:linkedFrom ?source }
        WHERE { ?source ex:linksTo ?target }
    "#;

    match engine.query(sparql) {
        Ok(results) => {
            println!("Backlink graph:");
            for triple in results.as_graph().unwrap_or(&[]) {
                println!("  {}", triple);
            }
        }
        Err(err) => eprintln!("{}", err),
    }
}
