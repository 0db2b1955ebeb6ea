use merel::query_engine::QueryEngine;
use merel::terms::Term;
use merel::triple::Triple;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

const NOTES: usize = 50_000;

fn main() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut triples = Vec::with_capacity(NOTES * 2);
    for i in 0..NOTES {
        let note = Term::iri(format!("vault://notes/n{}", i));
        triples.push(Triple::new(
            note.clone(),
            Term::iri("http://example.org/schema/tag"),
            Term::literal(format!("tag{}", rng.gen_range(0..100))),
        ));
        triples.push(Triple::new(
            note,
            Term::iri("http://example.org/schema/linksTo"),
            Term::iri(format!("vault://notes/n{}", rng.gen_range(0..NOTES))),
        ));
    }

    let mut engine = QueryEngine::new();
    let start = Instant::now();
    let added = engine.load(triples).expect("synthetic triples are ground");
    println!("loaded {} triples in {:?}", added, start.elapsed());

    let sparql = r#"
        PREFIX ex: <http://example.org/schema/>
        SELECT ?note ?other WHERE {
            ?note ex:tag "tag42" .
            ?note ex:linksTo ?other
        }
    "#;

    let start = Instant::now();
    match engine.query(sparql) {
        Ok(results) => {
            println!("{} rows in {:?}", results.len(), start.elapsed());
        }
        Err(err) => eprintln!("{}", err),
    }
}
