/*
 * Copyright © 2026 Merel contributors
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use nom::error::Error as NomError;
use std::fmt;

/// Position of a term within a triple, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriplePosition {
    Subject,
    Predicate,
    Object,
}

impl fmt::Display for TriplePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriplePosition::Subject => write!(f, "subject"),
            TriplePosition::Predicate => write!(f, "predicate"),
            TriplePosition::Object => write!(f, "object"),
        }
    }
}

/// A stored triple must be variable-free; insert rejects the triple
/// before touching any store state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    VariableInTriple { position: TriplePosition },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::VariableInTriple { position } => {
                write!(f, "stored triple may not contain a variable ({})", position)
            }
        }
    }
}

impl std::error::Error for StoreError {}

pub fn format_parse_error(input: &str, err: nom::Err<NomError<&str>>) -> String {
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            // Run targeted checks first, their messages beat a bare nom code
            if let Some(error_msg) = scan_for_specific_errors(input) {
                return error_msg;
            }

            let error_description = match e.code {
                nom::error::ErrorKind::Tag => ". Expected a specific tag or token",
                nom::error::ErrorKind::Char => ". Expected a specific character",
                nom::error::ErrorKind::Alt => ". Expected one of several alternatives",
                _ => "",
            };

            let offset = input.len() - e.input.len();
            format_error_at(input, offset, error_description)
        }
        nom::Err::Incomplete(_) => {
            "Incomplete input: the parser needs more input to complete parsing".to_string()
        }
    }
}

/// Line/column/caret rendering shared by nom failures and trailing-input
/// errors discovered after a successful partial parse.
pub fn format_error_at(input: &str, offset: usize, description: &str) -> String {
    let mut line_no = 1;
    let mut col_no = 1;

    for (i, c) in input.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line_no += 1;
            col_no = 1;
        } else {
            col_no += 1;
        }
    }

    let lines: Vec<&str> = input.lines().collect();
    let error_line = if line_no <= lines.len() {
        lines[line_no - 1]
    } else {
        "[end of input]"
    };

    format!(
        "\nSyntax error at line {}, column {}{}:\n{}\n{}^ Here\n",
        line_no,
        col_no,
        description,
        error_line,
        " ".repeat(col_no - 1)
    )
}

// Aggregator of custom checks
fn scan_for_specific_errors(input: &str) -> Option<String> {
    let lines: Vec<&str> = input.lines().collect();

    if let Some(error_msg) = check_for_missing_where(input) {
        return Some(error_msg);
    }

    if let Some(error_msg) = check_for_prefix_errors(&lines) {
        return Some(error_msg);
    }

    if let Some(error_msg) = check_for_unterminated_strings(&lines) {
        return Some(error_msg);
    }

    if let Some(error_msg) = check_for_mismatched_braces(&lines) {
        return Some(error_msg);
    }

    None
}

fn check_for_missing_where(input: &str) -> Option<String> {
    let upper = input.to_uppercase();
    let has_query_form = upper.contains("SELECT") || upper.contains("CONSTRUCT");
    if has_query_form && !upper.contains("WHERE") {
        return Some(
            "Syntax error: query is missing a WHERE clause (e.g. `WHERE { ?s ?p ?o }`)"
                .to_string(),
        );
    }
    None
}

fn check_for_prefix_errors(lines: &[&str]) -> Option<String> {
    for (line_no, line) in lines.iter().enumerate() {
        let trimmed = line.trim_start();
        if !trimmed.starts_with("PREFIX") {
            continue;
        }
        let rest = trimmed["PREFIX".len()..].trim_start();
        let before_iri = rest.split('<').next().unwrap_or("");
        if !before_iri.contains(':') {
            return Some(format!(
                "Syntax error at line {}: PREFIX declaration is missing ':' after the prefix name:\n{}",
                line_no + 1,
                line
            ));
        }
        if !rest.contains('<') || !rest.contains('>') {
            return Some(format!(
                "Syntax error at line {}: PREFIX declaration needs an IRI in angle brackets:\n{}",
                line_no + 1,
                line
            ));
        }
    }
    None
}

fn check_for_unterminated_strings(lines: &[&str]) -> Option<String> {
    for (line_no, line) in lines.iter().enumerate() {
        let quote_count = line.matches('"').count();
        if quote_count % 2 != 0 {
            return Some(format!(
                "Syntax error at line {}: unterminated string literal:\n{}",
                line_no + 1,
                line
            ));
        }
    }
    None
}

fn check_for_mismatched_braces(lines: &[&str]) -> Option<String> {
    let mut depth: i32 = 0;
    for (line_no, line) in lines.iter().enumerate() {
        for c in line.chars() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth < 0 {
                        return Some(format!(
                            "Syntax error at line {}: unexpected closing brace '}}':\n{}",
                            line_no + 1,
                            line
                        ));
                    }
                }
                _ => {}
            }
        }
    }
    if depth > 0 {
        return Some("Syntax error: unbalanced braces, a '}' is missing".to_string());
    }
    None
}
