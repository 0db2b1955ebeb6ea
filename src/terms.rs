/*
 * Copyright © 2026 Merel contributors
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// Tag attached to a literal: either a language tag (`"chat"@fr`) or a
/// datatype IRI (`"42"^^<http://www.w3.org/2001/XMLSchema#integer>`).
/// A literal carries at most one of the two.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LiteralTag {
    Language(String),
    Datatype(String),
}

/// RDF term. Equality is structural and exact: no datatype coercion,
/// `Literal("1", None)` and `Literal("1", xsd:integer)` are distinct terms.
///
/// `Variable` only ever appears inside a pattern; stored triples are
/// variable-free (enforced at insert time).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Term {
    Iri(String),
    Literal(String, Option<LiteralTag>),
    BlankNode(String),
    Variable(String),
}

impl Term {
    pub fn iri(value: impl Into<String>) -> Self {
        Term::Iri(value.into())
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Term::Literal(value.into(), None)
    }

    pub fn lang_literal(value: impl Into<String>, lang: impl Into<String>) -> Self {
        Term::Literal(value.into(), Some(LiteralTag::Language(lang.into())))
    }

    pub fn typed_literal(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Term::Literal(value.into(), Some(LiteralTag::Datatype(datatype.into())))
    }

    pub fn blank(id: impl Into<String>) -> Self {
        Term::BlankNode(id.into())
    }

    pub fn var(name: impl Into<String>) -> Self {
        Term::Variable(name.into())
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    /// Variable name without the leading `?`, if this term is a variable.
    pub fn as_variable(&self) -> Option<&str> {
        match self {
            Term::Variable(name) => Some(name),
            _ => None,
        }
    }
}

/// Classify a piece of raw text into a `Term`, the way frontmatter values
/// and convenience-insert arguments arrive from a vault:
/// `<...>` is an IRI, `"..."` a literal with an optional `@lang` or
/// `^^datatype` suffix, `_:x` a blank node, `?x` a variable, `ns:local`
/// expands through `prefixes`, and anything else is a plain literal
/// (including text with an unknown prefix, which stays as given).
pub fn classify_text(text: &str, prefixes: &HashMap<String, String>) -> Term {
    let text = text.trim();
    if let Some(name) = text.strip_prefix('?') {
        return Term::var(name);
    }
    if text.starts_with('<') && text.ends_with('>') && text.len() >= 2 {
        return Term::iri(&text[1..text.len() - 1]);
    }
    if let Some(id) = text.strip_prefix("_:") {
        return Term::blank(id);
    }
    if text.starts_with('"') {
        if let Some(pos) = text[1..].find('"') {
            let value = &text[1..pos + 1];
            let rest = &text[pos + 2..];
            if let Some(lang) = rest.strip_prefix('@') {
                return Term::lang_literal(value, lang);
            }
            if let Some(datatype) = rest.strip_prefix("^^") {
                let datatype = match classify_text(datatype, prefixes) {
                    Term::Iri(iri) => iri,
                    _ => datatype.to_string(),
                };
                return Term::typed_literal(value, datatype);
            }
            return Term::literal(value);
        }
        // Unterminated quote, keep the raw text
        return Term::literal(text);
    }
    if text.starts_with("http://") || text.starts_with("https://") {
        return Term::iri(text);
    }
    if text.contains(':') {
        let mut parts = text.splitn(2, ':');
        let prefix = parts.next().unwrap_or("");
        let local = parts.next().unwrap_or("");
        if let Some(base) = prefixes.get(prefix) {
            return Term::iri(format!("{}{}", base, local));
        }
    }
    Term::literal(text)
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{}>", iri),
            Term::Literal(value, None) => write!(f, "\"{}\"", value),
            Term::Literal(value, Some(LiteralTag::Language(lang))) => {
                write!(f, "\"{}\"@{}", value, lang)
            }
            Term::Literal(value, Some(LiteralTag::Datatype(datatype))) => {
                write!(f, "\"{}\"^^<{}>", value, datatype)
            }
            Term::BlankNode(id) => write!(f, "_:{}", id),
            Term::Variable(name) => write!(f, "?{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_recognizes_each_shape() {
        let mut prefixes = HashMap::new();
        prefixes.insert("ex".to_string(), "http://example.org/".to_string());

        assert_eq!(
            classify_text("<http://example.org/a>", &prefixes),
            Term::iri("http://example.org/a")
        );
        assert_eq!(classify_text("?x", &prefixes), Term::var("x"));
        assert_eq!(classify_text("_:b0", &prefixes), Term::blank("b0"));
        assert_eq!(
            classify_text("ex:alice", &prefixes),
            Term::iri("http://example.org/alice")
        );
        assert_eq!(
            classify_text("\"chat\"@fr", &prefixes),
            Term::lang_literal("chat", "fr")
        );
        assert_eq!(
            classify_text("\"42\"^^ex:int", &prefixes),
            Term::typed_literal("42", "http://example.org/int")
        );
        assert_eq!(classify_text("plain text", &prefixes), Term::literal("plain text"));
        // Unknown prefix stays as given
        assert_eq!(classify_text("nope:thing", &prefixes), Term::literal("nope:thing"));
    }

    #[test]
    fn display_is_ntriples_surface_syntax() {
        assert_eq!(Term::iri("http://a/b").to_string(), "<http://a/b>");
        assert_eq!(Term::literal("hi").to_string(), "\"hi\"");
        assert_eq!(Term::lang_literal("hi", "en").to_string(), "\"hi\"@en");
        assert_eq!(
            Term::typed_literal("1", "http://t").to_string(),
            "\"1\"^^<http://t>"
        );
        assert_eq!(Term::blank("b0").to_string(), "_:b0");
        assert_eq!(Term::var("x").to_string(), "?x");
    }
}
