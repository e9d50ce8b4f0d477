use serde::Serialize;
use sha2::{Digest, Sha256};

/// A syntax node selected for the output graph. `seq` is the order of first
/// visit in the pre-order traversal; `depth` is the compaction depth (the
/// nearest recorded ancestor plus one), not the raw tree depth.
#[derive(Debug, Clone, Serialize)]
pub struct CompactedNode {
    pub seq: usize,
    pub depth: usize,
    pub rule_id: u16,
    pub rule_name: String,
    pub text: String,
    pub start_line: usize,
    pub end_line: usize,
}

impl CompactedNode {
    /// Graph-unique identifier for this node.
    pub fn graph_id(&self) -> u64 {
        node_id(&self.text, self.seq)
    }
}

/// Parent→child edge, as indices into the node list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub parent: usize,
    pub child: usize,
}

/// The compacted node list plus the parent/child edges recovered from it.
/// Always a tree: one root, every other node exactly one parent.
#[derive(Debug, Clone)]
pub struct Graph {
    pub nodes: Vec<CompactedNode>,
    pub edges: Vec<Edge>,
}

impl Graph {
    /// Recover edges from the flattened (seq, depth) list. Pre-order
    /// guarantees the most recent node at depth d-1 is the true parent of a
    /// node at depth d, so a stack of the latest node per depth replaces the
    /// O(n) backward scan with the same discovery order.
    pub fn from_nodes(nodes: Vec<CompactedNode>) -> Self {
        let mut edges = Vec::new();
        let mut last_at_depth: Vec<usize> = Vec::new();
        for node in &nodes {
            last_at_depth.truncate(node.depth);
            if node.depth > 0 {
                if let Some(&parent) = last_at_depth.get(node.depth - 1) {
                    edges.push(Edge {
                        parent,
                        child: node.seq,
                    });
                }
            }
            last_at_depth.push(node.seq);
        }
        Self { nodes, edges }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Deterministic node identifier: SHA-256 over the literal text and the
/// sequence position, truncated to a u64. The position keeps repeated
/// literal text (`i++` everywhere) from aliasing.
pub fn node_id(text: &str, seq: usize) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hasher.update([0x1f]);
    hasher.update(seq.to_string().as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}
