use tree_sitter::Node;

use crate::graph::model::{CompactedNode, Graph};
use crate::parser::ParsedUnit;

/// Compact the parse tree into the flattened node list: depth-first
/// pre-order, eliding chain nodes (a rule that trivially rewrites to a
/// single sub-rule) unless `verbose` keeps everything. Elided nodes add no
/// entry and do not deepen their descendants.
pub fn compact(unit: &ParsedUnit, verbose: bool) -> Vec<CompactedNode> {
    let mut nodes = Vec::new();
    visit(unit.root(), unit.source.as_str(), verbose, 0, &mut nodes);
    nodes
}

/// Compact and recover edges in one step.
pub fn build_graph(unit: &ParsedUnit, verbose: bool) -> Graph {
    Graph::from_nodes(compact(unit, verbose))
}

fn visit(
    node: Node<'_>,
    source: &str,
    verbose: bool,
    depth: usize,
    out: &mut Vec<CompactedNode>,
) {
    let elided = !verbose && is_chain_node(node);
    if !elided {
        out.push(CompactedNode {
            seq: out.len(),
            depth,
            rule_id: node.kind_id(),
            rule_name: node.kind().to_string(),
            text: node.utf8_text(source.as_bytes()).unwrap_or_default().to_string(),
            start_line: node.start_position().row + 1,
            end_line: node.end_position().row + 1,
        });
    }

    let child_depth = if elided { depth } else { depth + 1 };
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        // Rule nodes only; tokens are terminals and comments ride a hidden
        // channel as far as the graph is concerned
        if child.is_named() && !child.is_extra() {
            visit(child, source, verbose, child_depth, out);
        }
    }
}

/// A chain node has exactly one child and that child is itself a rule node,
/// not a token. Such nodes carry no information beyond their single child.
fn is_chain_node(node: Node<'_>) -> bool {
    let mut cursor = node.walk();
    let mut total = 0;
    let mut child_is_rule = false;
    for child in node.children(&mut cursor) {
        if child.is_extra() {
            continue;
        }
        total += 1;
        if total > 1 {
            return false;
        }
        child_is_rule = child.is_named();
    }
    total == 1 && child_is_rule
}
