use regex::Regex;

use crate::normalizer::normalize::{normalize, Strictness};

const EMPTY_TYPE_WRAP: &str = "public class Snippet {}";

/// How a fragment was classified and wrapped into a compilable unit.
/// Ordering of the variants reflects candidate priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrapStrategy {
    MinType,
    AggType,
    MinStatement,
    AggStatement,
    MinMember,
    AggMember,
    MinDefault,
    MinEmpty,
}

impl WrapStrategy {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::MinType => "min-type",
            Self::AggType => "agg-type",
            Self::MinStatement => "min-statement",
            Self::AggStatement => "agg-statement",
            Self::MinMember => "min-member",
            Self::AggMember => "agg-member",
            Self::MinDefault => "min-default",
            Self::MinEmpty => "min-empty",
        }
    }
}

impl std::fmt::Display for WrapStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// One attempt at making a fragment parseable: the wrapped source plus the
/// strategy that produced it.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub source: String,
    pub strategy: WrapStrategy,
}

/// Classify a raw fragment and produce wrap candidates in priority order:
/// type declarations are used verbatim, statements go inside a method body,
/// members inside a bare type body, with aggressive-normalization retries
/// after the minimal forms and a guaranteed statement-wrap fallback last.
///
/// Pure function of the input text; always returns at least one candidate.
pub fn classify_and_wrap(fragment: &str) -> Vec<Candidate> {
    if fragment.trim().is_empty() {
        return vec![Candidate {
            source: EMPTY_TYPE_WRAP.to_string(),
            strategy: WrapStrategy::MinEmpty,
        }];
    }

    let minimal = normalize(fragment, Strictness::Minimal);
    let aggressive = normalize(fragment, Strictness::Aggressive);
    let min_probe = strip_leading_comments(minimal.trim());
    let agg_probe = strip_leading_comments(aggressive.trim());

    let mut candidates: Vec<Candidate> = Vec::new();

    if looks_like_type_declaration(&min_probe) {
        push_unique(&mut candidates, minimal.trim().to_string(), WrapStrategy::MinType);
    } else if looks_like_type_declaration(&agg_probe) {
        push_unique(&mut candidates, aggressive.trim().to_string(), WrapStrategy::AggType);
    }
    if looks_like_statement(&min_probe) {
        push_unique(&mut candidates, wrap_as_statement(&minimal), WrapStrategy::MinStatement);
    }
    if looks_like_member_declaration(&min_probe) {
        push_unique(&mut candidates, wrap_as_member(&minimal), WrapStrategy::MinMember);
    }
    if looks_like_statement(&agg_probe) {
        push_unique(&mut candidates, wrap_as_statement(&aggressive), WrapStrategy::AggStatement);
    }
    if looks_like_member_declaration(&agg_probe) {
        push_unique(&mut candidates, wrap_as_member(&aggressive), WrapStrategy::AggMember);
    }

    // Fallback: every fragment ends with a statement wrap of the
    // minimally-normalized text, elided only when it would repeat the
    // candidate already in last position
    let fallback = wrap_as_statement(&minimal);
    if candidates.last().map(|c| c.source != fallback).unwrap_or(true) {
        candidates.push(Candidate {
            source: fallback,
            strategy: WrapStrategy::MinDefault,
        });
    }

    candidates
}

// The first candidate with a given wrapped source wins; later duplicates
// would only make the driver parse identical text twice.
fn push_unique(candidates: &mut Vec<Candidate>, source: String, strategy: WrapStrategy) {
    if !candidates.iter().any(|c| c.source == source) {
        candidates.push(Candidate { source, strategy });
    }
}

pub fn wrap_as_member(snippet: &str) -> String {
    format!("public class Snippet {{\n{}\n}}\n", snippet)
}

pub fn wrap_as_statement(snippet: &str) -> String {
    format!(
        "public class Snippet {{\n  void snippetMethod() {{\n{}\n  }}\n}}\n",
        indent_snippet(snippet, "    ")
    )
}

fn indent_snippet(snippet: &str, indent: &str) -> String {
    snippet
        .split('\n')
        .map(|line| format!("{}{}", indent, line.strip_suffix('\r').unwrap_or(line)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Drop leading `//` and `/*...*/` runs so comments ahead of a fragment do
/// not defeat the prefix heuristics. The wrapped output keeps the comments.
pub fn strip_leading_comments(snippet: &str) -> String {
    let mut remaining = snippet.trim();
    loop {
        if remaining.starts_with("//") {
            remaining = match remaining.find('\n') {
                Some(newline) => remaining[newline + 1..].trim(),
                None => "",
            };
        } else if remaining.starts_with("/*") {
            remaining = match remaining.find("*/") {
                Some(end) => remaining[end + 2..].trim(),
                None => "",
            };
        } else {
            return remaining.to_string();
        }
    }
}

fn looks_like_type_declaration(probe: &str) -> bool {
    let lower = probe.to_lowercase();
    if lower.starts_with("package ") || lower.starts_with("import ") {
        return true;
    }
    let re = Regex::new(
        r"^(?:@[_A-Za-z][\w$.]*(?:\s*\([^)]*\))?\s*)*(?:(?:public|protected|private|abstract|static|final|strictfp)\s+)*(?:class|interface|enum)\b",
    )
    .unwrap();
    re.is_match(probe)
}

fn looks_like_statement(probe: &str) -> bool {
    let lower = probe.to_lowercase();
    lower.starts_with("if ")
        || lower.starts_with("if(")
        || lower.starts_with("for ")
        || lower.starts_with("for(")
        || lower.starts_with("while ")
        || lower.starts_with("while(")
        || lower.starts_with("switch ")
        || lower.starts_with("switch(")
        || lower.starts_with("try ")
        || lower.starts_with("try{")
        || lower.starts_with("return ")
        || lower.starts_with("return;")
        || lower.starts_with("throw ")
        || lower.starts_with("do ")
        || lower.starts_with("break")
        || lower.starts_with("continue")
        || lower.starts_with("case ")
        || lower.starts_with("default")
}

fn looks_like_member_declaration(probe: &str) -> bool {
    if probe.starts_with('@') {
        return true;
    }
    if looks_like_statement(probe) {
        return false;
    }
    let has_parens = probe.contains('(') && probe.contains(')');
    let has_braces = probe.contains('{') && probe.contains('}');
    if has_parens && has_braces {
        return true;
    }
    probe.contains(';') && !probe.contains("class ")
}
