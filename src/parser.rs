use crate::custom_error::{format_error_at, format_parse_error};
use crate::query::{ConstructQuery, Projection, Query, SelectQuery};
use crate::terms::{Term, RDF_TYPE};
use crate::triple::TriplePattern;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, digit1, multispace0, multispace1, space0, space1},
    combinator::{map, opt, peek},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};
use std::collections::HashMap;

/// An IRI as written in query text, before prefix expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawIri<'a> {
    Full(&'a str),
    Prefixed(&'a str, &'a str),
}

/// One term as written in query text. Prefixed names and the `a`
/// keyword are expanded during resolution, after all PREFIX
/// declarations are known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawTerm<'a> {
    Variable(&'a str),
    Iri(RawIri<'a>),
    RdfType,
    Literal {
        value: &'a str,
        lang: Option<&'a str>,
        datatype: Option<RawIri<'a>>,
    },
    Blank(&'a str),
}

pub type RawTriple<'a> = (RawTerm<'a>, RawTerm<'a>, RawTerm<'a>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawQueryForm<'a> {
    Select {
        variables: Option<Vec<&'a str>>, // None = SELECT *
        patterns: Vec<RawTriple<'a>>,
        limit: Option<usize>,
    },
    Construct {
        template: Vec<RawTriple<'a>>,
        patterns: Vec<RawTriple<'a>>,
        limit: Option<usize>,
    },
}

// Helper function to recognize identifiers
pub fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)
}

// Parser for variables (e.g., ?person)
pub fn variable(input: &str) -> IResult<&str, &str> {
    preceded(char('?'), identifier)(input)
}

// Parser for a URI within angle brackets
pub fn iri_ref(input: &str) -> IResult<&str, &str> {
    delimited(char('<'), take_while1(|c| c != '>'), char('>'))(input)
}

// Parser for a prefixed name like ex:worksAt or :worksAt
pub fn prefixed_name(input: &str) -> IResult<&str, (&str, &str)> {
    map(
        pair(opt(identifier), preceded(char(':'), identifier)),
        |(prefix, local)| (prefix.unwrap_or(""), local),
    )(input)
}

// Parser for a blank node label like _:b0
pub fn blank_node(input: &str) -> IResult<&str, &str> {
    preceded(tag("_:"), identifier)(input)
}

// Language tags allow letters, digits and '-'
fn language_tag(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '-')(input)
}

fn iri_or_prefixed(input: &str) -> IResult<&str, RawIri> {
    alt((
        map(iri_ref, RawIri::Full),
        map(prefixed_name, |(p, l)| RawIri::Prefixed(p, l)),
    ))(input)
}

// Parser for a literal: "value" with optional @lang or ^^datatype
pub fn literal(input: &str) -> IResult<&str, RawTerm> {
    let (input, value) = delimited(char('"'), take_while(|c| c != '"'), char('"'))(input)?;
    let (input, lang) = opt(preceded(char('@'), language_tag))(input)?;
    if lang.is_some() {
        return Ok((
            input,
            RawTerm::Literal {
                value,
                lang,
                datatype: None,
            },
        ));
    }
    let (input, datatype) = opt(preceded(tag("^^"), iri_or_prefixed))(input)?;
    Ok((
        input,
        RawTerm::Literal {
            value,
            lang: None,
            datatype,
        },
    ))
}

// The `a` keyword (rdf:type), only when it stands alone
fn rdf_type_keyword(input: &str) -> IResult<&str, RawTerm> {
    map(terminated(tag("a"), peek(multispace1)), |_| RawTerm::RdfType)(input)
}

// Parser for any term position in a triple block
pub fn term(input: &str) -> IResult<&str, RawTerm> {
    alt((
        map(variable, RawTerm::Variable),
        map(iri_ref, |iri| RawTerm::Iri(RawIri::Full(iri))),
        literal,
        map(blank_node, RawTerm::Blank),
        rdf_type_keyword,
        map(prefixed_name, |(p, l)| RawTerm::Iri(RawIri::Prefixed(p, l))),
    ))(input)
}

// Helper parser to parse a single predicate-object pair.
pub fn parse_predicate_object(input: &str) -> IResult<&str, (RawTerm, RawTerm)> {
    let (input, p) = term(input)?;
    let (input, _) = multispace1(input)?;
    let (input, o) = term(input)?;
    Ok((input, (p, o)))
}

// A subject with one or more `;`-separated predicate-object pairs.
pub fn parse_triple_block(input: &str) -> IResult<&str, Vec<RawTriple>> {
    let (input, subject) = term(input)?;
    let (input, _) = multispace1(input)?;

    let (input, first_po) = parse_predicate_object(input)?;

    let (input, rest_po) = many0(preceded(
        tuple((multispace0, char(';'), multispace0)),
        parse_predicate_object,
    ))(input)?;

    let mut pairs = vec![first_po];
    pairs.extend(rest_po);

    let triples = pairs
        .into_iter()
        .map(|(p, o)| (subject.clone(), p, o))
        .collect();

    Ok((input, triples))
}

// A brace-delimited group of `.`-separated triple blocks.
pub fn parse_group(input: &str) -> IResult<&str, Vec<RawTriple>> {
    let (input, _) = char('{')(input)?;
    let (input, _) = multispace0(input)?;
    let (input, blocks) = separated_list1(
        tuple((multispace0, char('.'), multispace0)),
        parse_triple_block,
    )(input)?;
    let (input, _) = opt(preceded(multispace0, char('.')))(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char('}')(input)?;

    Ok((input, blocks.into_iter().flatten().collect()))
}

// Parser for PREFIX declarations
pub fn parse_prefix(input: &str) -> IResult<&str, (&str, &str)> {
    let (input, _) = multispace0(input)?;
    let (input, _) = tag("PREFIX")(input)?;
    let (input, _) = space1(input)?;
    let (input, prefix) = opt(identifier)(input)?;
    let (input, _) = char(':')(input)?;
    let (input, _) = space0(input)?;
    let (input, uri) = iri_ref(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, (prefix.unwrap_or(""), uri)))
}

// SELECT clause: `*` or a list of variables
pub fn parse_select(input: &str) -> IResult<&str, Option<Vec<&str>>> {
    let (input, _) = tag("SELECT")(input)?;
    let (input, _) = space1(input)?;

    if let Ok((input, _)) = char::<_, nom::error::Error<&str>>('*')(input) {
        return Ok((input, None));
    }

    let (input, variables) = separated_list1(space1, variable)(input)?;
    Ok((input, Some(variables)))
}

pub fn parse_limit(input: &str) -> IResult<&str, usize> {
    let (input, _) = multispace0(input)?;
    let (input, _) = tag("LIMIT")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, digits) = digit1(input)?;
    // overflow clamps rather than failing the parse
    Ok((input, digits.parse().unwrap_or(usize::MAX)))
}

fn parse_select_form(input: &str) -> IResult<&str, RawQueryForm> {
    let (input, variables) = parse_select(input)?;
    let (input, _) = multispace1(input)?;
    let (input, _) = tag("WHERE")(input)?;
    let (input, _) = multispace0(input)?;
    let (input, patterns) = parse_group(input)?;
    let (input, limit) = opt(parse_limit)(input)?;
    Ok((
        input,
        RawQueryForm::Select {
            variables,
            patterns,
            limit,
        },
    ))
}

fn parse_construct_form(input: &str) -> IResult<&str, RawQueryForm> {
    let (input, _) = tag("CONSTRUCT")(input)?;
    let (input, _) = multispace0(input)?;
    let (input, template) = parse_group(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = tag("WHERE")(input)?;
    let (input, _) = multispace0(input)?;
    let (input, patterns) = parse_group(input)?;
    let (input, limit) = opt(parse_limit)(input)?;
    Ok((
        input,
        RawQueryForm::Construct {
            template,
            patterns,
            limit,
        },
    ))
}

/// Raw parse of a whole query: PREFIX declarations followed by one
/// SELECT or CONSTRUCT form.
pub fn parse_query_body(input: &str) -> IResult<&str, (HashMap<String, String>, RawQueryForm)> {
    let mut input = input;
    let mut prefixes = HashMap::new();

    // Parse zero or more PREFIX declarations
    loop {
        let original_input = input;
        if let Ok((new_input, (prefix, uri))) = parse_prefix(input) {
            prefixes.insert(prefix.to_string(), uri.to_string());
            input = new_input;
        } else {
            input = original_input;
            break;
        }
    }

    let (input, _) = multispace0(input)?;
    let (input, form) = alt((parse_construct_form, parse_select_form))(input)?;

    Ok((input, (prefixes, form)))
}

/// Parse a SPARQL query string into a typed `Query`. Prefixed names
/// expand at parse time; an unknown prefix is a parse error.
pub fn parse_query(input: &str) -> Result<Query, String> {
    parse_query_with_prefixes(input, &HashMap::new())
}

/// Like `parse_query`, but prefixes missing from the query text may be
/// drawn from `fallback` (typically the store's prefix registry).
/// In-query declarations take precedence.
pub fn parse_query_with_prefixes(
    input: &str,
    fallback: &HashMap<String, String>,
) -> Result<Query, String> {
    let (rest, (prefixes, form)) = match parse_query_body(input) {
        Ok(parsed) => parsed,
        Err(err) => return Err(format_parse_error(input, err)),
    };

    let trailing = rest.trim_start();
    if !trailing.is_empty() {
        let offset = input.len() - trailing.len();
        return Err(format_error_at(input, offset, ". Unexpected trailing input"));
    }

    resolve_form(form, &prefixes, fallback)
}

fn resolve_form(
    form: RawQueryForm,
    prefixes: &HashMap<String, String>,
    fallback: &HashMap<String, String>,
) -> Result<Query, String> {
    match form {
        RawQueryForm::Select {
            variables,
            patterns,
            limit,
        } => {
            let projection = match variables {
                None => Projection::All,
                Some(names) => {
                    Projection::Variables(names.into_iter().map(str::to_string).collect())
                }
            };
            Ok(Query::Select(SelectQuery {
                patterns: resolve_patterns(patterns, prefixes, fallback)?,
                projection,
                limit,
            }))
        }
        RawQueryForm::Construct {
            template,
            patterns,
            limit,
        } => Ok(Query::Construct(ConstructQuery {
            patterns: resolve_patterns(patterns, prefixes, fallback)?,
            template: resolve_patterns(template, prefixes, fallback)?,
            limit,
        })),
    }
}

fn resolve_patterns(
    raw: Vec<RawTriple>,
    prefixes: &HashMap<String, String>,
    fallback: &HashMap<String, String>,
) -> Result<Vec<TriplePattern>, String> {
    raw.into_iter()
        .map(|(s, p, o)| {
            Ok(TriplePattern::new(
                resolve_term(s, prefixes, fallback)?,
                resolve_term(p, prefixes, fallback)?,
                resolve_term(o, prefixes, fallback)?,
            ))
        })
        .collect()
}

fn resolve_term(
    raw: RawTerm,
    prefixes: &HashMap<String, String>,
    fallback: &HashMap<String, String>,
) -> Result<Term, String> {
    match raw {
        RawTerm::Variable(name) => Ok(Term::var(name)),
        RawTerm::Iri(iri) => Ok(Term::iri(resolve_iri(iri, prefixes, fallback)?)),
        RawTerm::RdfType => Ok(Term::iri(RDF_TYPE)),
        RawTerm::Blank(id) => Ok(Term::blank(id)),
        RawTerm::Literal {
            value,
            lang,
            datatype,
        } => match (lang, datatype) {
            (Some(lang), _) => Ok(Term::lang_literal(value, lang)),
            (None, Some(datatype)) => Ok(Term::typed_literal(
                value,
                resolve_iri(datatype, prefixes, fallback)?,
            )),
            (None, None) => Ok(Term::literal(value)),
        },
    }
}

fn resolve_iri(
    iri: RawIri,
    prefixes: &HashMap<String, String>,
    fallback: &HashMap<String, String>,
) -> Result<String, String> {
    match iri {
        RawIri::Full(iri) => Ok(iri.to_string()),
        RawIri::Prefixed(prefix, local) => {
            // In-query declarations first, then the caller's registry
            if let Some(base) = prefixes.get(prefix) {
                Ok(format!("{}{}", base, local))
            } else if let Some(base) = fallback.get(prefix) {
                Ok(format!("{}{}", base, local))
            } else {
                Err(format!("Unknown prefix in query: {}:", prefix))
            }
        }
    }
}
