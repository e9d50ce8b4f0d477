use std::collections::{HashMap, HashSet};

use javagraph::graph::{compact, dot_string, escape_label, node_id};
use javagraph::pipeline::{Fragment, FragmentOutcome, GraphGenerator};
use javagraph::{build_graph, JavaParser, WrapStrategy};
use regex::Regex;

#[test]
fn emitted_graph_is_a_tree() {
    let mut parser = JavaParser::new().unwrap();
    let unit = parser
        .parse("public class Snippet {\nint x = 5;\nvoid f() { x++; }\n}\n")
        .expect("wrapped member snippet should parse");
    let graph = build_graph(&unit, false);

    assert!(!graph.is_empty());
    assert_eq!(graph.edges.len(), graph.node_count() - 1);

    let roots: Vec<_> = graph.nodes.iter().filter(|n| n.depth == 0).collect();
    assert_eq!(roots.len(), 1, "exactly one root");

    let mut incoming: HashMap<usize, usize> = HashMap::new();
    for edge in &graph.edges {
        *incoming.entry(edge.child).or_insert(0) += 1;
    }
    for node in &graph.nodes {
        if node.seq == roots[0].seq {
            assert!(!incoming.contains_key(&node.seq), "root has no parent");
        } else {
            assert_eq!(incoming.get(&node.seq), Some(&1), "one parent per node");
        }
    }
}

#[test]
fn unary_chains_collapse() {
    let mut parser = JavaParser::new().unwrap();
    let unit = parser.parse("x = 1;").expect("bare statement should parse");

    // program trivially rewrites to its single statement; compaction drops it
    let nodes = compact(&unit, false);
    assert_eq!(nodes[0].rule_name, "expression_statement");
    assert_eq!(nodes[0].depth, 0);
    assert!(nodes.iter().all(|n| n.rule_name != "program"));

    // verbose keeps the chain
    let verbose_nodes = compact(&unit, true);
    assert_eq!(verbose_nodes[0].rule_name, "program");
    assert!(verbose_nodes.len() > nodes.len());
}

#[test]
fn node_ids_are_unique_and_deterministic() {
    assert_eq!(node_id("i++", 3), node_id("i++", 3));
    assert_ne!(node_id("i++", 0), node_id("i++", 1));

    let mut parser = JavaParser::new().unwrap();
    let unit = parser
        .parse("public class Snippet {\nvoid f() { i++; i++; }\n}\n")
        .expect("snippet should parse");
    let graph = build_graph(&unit, false);
    let ids: HashSet<u64> = graph.nodes.iter().map(|n| n.graph_id()).collect();
    assert_eq!(ids.len(), graph.node_count(), "repeated text must not alias nodes");
}

#[test]
fn labels_are_escaped() {
    assert_eq!(escape_label("a\"b\\c\nd"), "a\\\"b\\\\c\\nd");
    assert_eq!(escape_label("tab\there"), "tab\\there");
    assert_eq!(escape_label("cr\rhere"), "cr\\rhere");
}

#[test]
fn dot_document_shape() {
    let mut generator = GraphGenerator::new().unwrap();
    let fragment = Fragment::new("String s = \"a\\\"b\";", Some("k=\"v\"".to_string()));
    let graph = match generator.process(&fragment) {
        FragmentOutcome::Success { graph, strategy } => {
            assert_eq!(strategy, WrapStrategy::MinMember);
            graph
        }
        FragmentOutcome::Failure { .. } => panic!("field snippet should parse"),
    };

    let dot = dot_string(&graph, fragment.header.as_deref());
    assert!(dot.starts_with("digraph G {\n"));
    assert!(dot.ends_with("}\n"));
    assert!(dot.contains("graph [comment=\"k=\\\"v\\\"\"]"));

    let node_line = Regex::new(
        r#"(?m)^  "\d+" \[label=".*", type=\d+, typeName="\w+", startLineNumber=\d+, endLineNumber=\d+\]$"#,
    )
    .unwrap();
    assert_eq!(
        node_line.find_iter(&dot).count(),
        graph.node_count(),
        "one attribute line per node"
    );
    let edge_line = Regex::new(r#"(?m)^  "\d+" -> "\d+"$"#).unwrap();
    assert_eq!(edge_line.find_iter(&dot).count(), graph.edges.len());

    // The embedded string literal's quote and backslash are escaped
    assert!(dot.contains(r#"\\\""#));
}

#[test]
fn statement_fragment_is_accepted_as_statement() {
    let mut generator = GraphGenerator::new().unwrap();
    match generator.process(&Fragment::new("if (x > 0) { return x; }", None)) {
        FragmentOutcome::Success { strategy, .. } => {
            assert_eq!(strategy, WrapStrategy::MinStatement)
        }
        FragmentOutcome::Failure { .. } => panic!("statement should parse"),
    }
}

#[test]
fn type_fragment_is_accepted_unwrapped() {
    let mut generator = GraphGenerator::new().unwrap();
    match generator.process(&Fragment::new("public class Foo { int x; }", None)) {
        FragmentOutcome::Success { strategy, .. } => assert_eq!(strategy, WrapStrategy::MinType),
        FragmentOutcome::Failure { .. } => panic!("type declaration should parse"),
    }
}

#[test]
fn hopeless_fragment_reports_every_attempt() {
    let mut generator = GraphGenerator::new().unwrap();
    match generator.process(&Fragment::new("%%% not java %%%", None)) {
        FragmentOutcome::Success { .. } => panic!("garbage must not parse"),
        FragmentOutcome::Failure { attempts } => {
            assert!(!attempts.is_empty());
            assert_eq!(attempts.last().unwrap().strategy, WrapStrategy::MinDefault);
            for attempt in &attempts {
                assert!(!attempt.errors.is_empty(), "rejections carry syntax errors");
                assert!(attempt.source.contains("%%% not java %%%"));
            }
        }
    }
}
