use merel::query_engine::QueryEngine;

fn main() {
    let mut engine = QueryEngine::new();
    engine.register_prefix("vault", "vault://notes/");
    engine.register_prefix("ex", "http://example.org/schema/");

    let notes = [
        ("vault:zettelkasten", "ex:title", "\"Zettelkasten\""),
        ("vault:zettelkasten", "ex:status", "\"evergreen\""),
        ("vault:zettelkasten", "ex:linksTo", "vault:luhmann"),
        ("vault:luhmann", "ex:title", "\"Niklas Luhmann\""),
        ("vault:luhmann", "ex:status", "\"evergreen\""),
        ("vault:inbox", "ex:title", "\"Inbox\""),
        ("vault:inbox", "ex:status", "\"draft\""),
    ];
    for (s, p, o) in notes {
        engine.insert_parts(s, p, o).expect("vault triples are ground");
    }

    let sparql = r#"
        SELECT ?note ?title WHERE {
            ?note ex:status "evergreen" .
            ?note ex:title ?title
        }
    "#;

    println!("Evergreen notes:");
    match engine.query(sparql) {
        Ok(results) => {
            for row in results.as_solutions().unwrap_or(&[]) {
                let vars: Vec<String> = row
                    .variables()
                    .map(|v| match row.get(v) {
                        Some(term) => format!("?{} = {}", v, term),
                        None => format!("?{} = <unbound>", v),
                    })
                    .collect();
                println!("  {}", vars.join("  "));
            }
            println!("\nAs SPARQL results JSON:\n{}", results.to_json());
        }
        Err(err) => eprintln!("{}", err),
    }
}
