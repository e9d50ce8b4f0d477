use regex::Regex;

use crate::normalizer::mask::{mask_literals, unmask_literals};

/// Java modifier keywords that aggressive normalization re-separates from a
/// following identifier (guards against fragments with dropped whitespace,
/// e.g. `publicclass Foo`).
pub const MODIFIER_KEYWORDS: [&str; 9] = [
    "public",
    "protected",
    "private",
    "static",
    "final",
    "abstract",
    "native",
    "strictfp",
    "synchronized",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strictness {
    Minimal,
    Aggressive,
}

/// Normalize spacing around structural tokens so sloppily-extracted fragments
/// still tokenize. All rewrites run on masked text; literal contents are
/// restored unchanged afterwards.
pub fn normalize(fragment: &str, strictness: Strictness) -> String {
    let masked = mask_literals(fragment);
    let mut text = masked.text;

    if strictness == Strictness::Aggressive {
        for keyword in MODIFIER_KEYWORDS {
            let re = Regex::new(&format!(r"\b{}([A-Za-z_])", keyword)).unwrap();
            text = re.replace_all(&text, format!("{} $1", keyword)).into_owned();
        }
    }

    let re = Regex::new(r"([A-Za-z_])\(").unwrap();
    text = re.replace_all(&text, "$1 (").into_owned();
    let re = Regex::new(r"\)([A-Za-z_])").unwrap();
    text = re.replace_all(&text, ") $1").into_owned();
    let re = Regex::new(r"([A-Za-z_])\{").unwrap();
    text = re.replace_all(&text, "$1 {").into_owned();
    let re = Regex::new(r"\}([A-Za-z_])").unwrap();
    text = re.replace_all(&text, "} $1").into_owned();

    text = space_after_semicolons(&text);

    // Collapse horizontal whitespace only; newlines carry line numbers
    let re = Regex::new(r"[ \t\x0B\x0C\r]+").unwrap();
    text = re.replace_all(&text, " ").into_owned();

    unmask_literals(&text, &masked.literals)
}

// A capture rewrite cannot handle runs like `;;x`, so this one is a scan.
fn space_after_semicolons(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        if c == ';' {
            if let Some(next) = chars.peek() {
                if !next.is_whitespace() {
                    out.push(' ');
                }
            }
        }
    }
    out
}
