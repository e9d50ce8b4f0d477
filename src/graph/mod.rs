// Parse-tree compaction and graph emission

pub mod compactor;
pub mod dot;
pub mod model;

pub use compactor::{build_graph, compact};
pub use dot::{dot_string, escape_label, write_dot};
pub use model::{node_id, CompactedNode, Edge, Graph};
