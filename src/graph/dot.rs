use std::io::Write;

use anyhow::Result;

use crate::graph::model::Graph;

/// Escape text for embedding in a quoted DOT attribute value.
pub fn escape_label(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Write the graph as a DOT document: the optional forwarded header as a
/// graph-level comment attribute, one entry per node with its metadata, then
/// the parent→child edges in discovery order.
pub fn write_dot<W: Write>(out: &mut W, graph: &Graph, header: Option<&str>) -> Result<()> {
    writeln!(out, "digraph G {{")?;
    if let Some(header) = header {
        if !header.is_empty() {
            writeln!(out, "  graph [comment=\"{}\"]", escape_label(header))?;
        }
    }
    for node in &graph.nodes {
        writeln!(
            out,
            "  \"{}\" [label=\"{}\", type={}, typeName=\"{}\", startLineNumber={}, endLineNumber={}]",
            node.graph_id(),
            escape_label(&node.text),
            node.rule_id,
            node.rule_name,
            node.start_line,
            node.end_line,
        )?;
    }
    for edge in &graph.edges {
        writeln!(
            out,
            "  \"{}\" -> \"{}\"",
            graph.nodes[edge.parent].graph_id(),
            graph.nodes[edge.child].graph_id(),
        )?;
    }
    writeln!(out, "}}")?;
    Ok(())
}

/// Render the DOT document to a string.
pub fn dot_string(graph: &Graph, header: Option<&str>) -> String {
    let mut buf = Vec::new();
    // Writing to a Vec cannot fail
    write_dot(&mut buf, graph, header).unwrap();
    String::from_utf8(buf).unwrap()
}
