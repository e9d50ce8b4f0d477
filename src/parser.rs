use anyhow::{Context, Result};
use serde::Serialize;
use tree_sitter::{Node, Parser, Tree};

/// One syntax error reported by the grammar. Lines are 1-based, columns
/// 0-based (tree-sitter's convention).
#[derive(Debug, Clone, Serialize)]
pub struct SyntaxError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}:{} {}", self.line, self.column, self.message)
    }
}

/// A successfully parsed compilation unit. Owns the tree and the exact
/// source text it was parsed from; node spans index into that text.
pub struct ParsedUnit {
    tree: Tree,
    pub source: String,
}

impl ParsedUnit {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }
}

/// Wrapper around the external grammar-driven Java parser. Stateful (the
/// underlying parser reuses internal buffers), so each worker owns one.
pub struct JavaParser {
    parser: Parser,
}

impl JavaParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_java::LANGUAGE.into())
            .context("Failed to load the Java grammar")?;
        Ok(Self { parser })
    }

    /// Parse a compilable unit. Returns the tree on syntactic acceptance, or
    /// every error site the grammar reported. Malformed input never panics.
    pub fn parse(&mut self, source: &str) -> std::result::Result<ParsedUnit, Vec<SyntaxError>> {
        let tree = match self.parser.parse(source, None) {
            Some(tree) => tree,
            None => {
                return Err(vec![SyntaxError {
                    line: 1,
                    column: 0,
                    message: "parser produced no tree".to_string(),
                }])
            }
        };

        let errors = collect_syntax_errors(tree.root_node(), source);
        if errors.is_empty() {
            Ok(ParsedUnit {
                tree,
                source: source.to_string(),
            })
        } else {
            Err(errors)
        }
    }
}

/// Harvest every error site in the tree, in document order: ERROR nodes for
/// unexpected input and zero-width missing tokens inserted by recovery.
fn collect_syntax_errors(root: Node<'_>, source: &str) -> Vec<SyntaxError> {
    let mut errors = Vec::new();
    walk_errors(root, source, &mut errors);
    errors
}

fn walk_errors(node: Node<'_>, source: &str, errors: &mut Vec<SyntaxError>) {
    if !node.has_error() {
        return;
    }
    if node.is_error() {
        errors.push(SyntaxError {
            line: node.start_position().row + 1,
            column: node.start_position().column,
            message: format!(
                "unexpected input near `{}`",
                excerpt(node.utf8_text(source.as_bytes()).unwrap_or_default())
            ),
        });
    } else if node.is_missing() {
        errors.push(SyntaxError {
            line: node.start_position().row + 1,
            column: node.start_position().column,
            message: format!("missing {}", node.kind()),
        });
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk_errors(child, source, errors);
    }
}

fn excerpt(text: &str) -> String {
    let one_line = text.replace(['\n', '\r'], " ");
    let trimmed = one_line.trim();
    if trimmed.chars().count() > 24 {
        let head: String = trimmed.chars().take(24).collect();
        format!("{}...", head)
    } else {
        trimmed.to_string()
    }
}
