pub mod dataset;
pub mod graph;
pub mod normalizer;
pub mod parser;
pub mod pipeline;

// Re-export main types and functions
pub use graph::{build_graph, compact, CompactedNode, Graph};
pub use normalizer::{classify_and_wrap, Candidate, Strictness, WrapStrategy};
pub use parser::{JavaParser, ParsedUnit, SyntaxError};
pub use pipeline::{Fragment, FragmentOutcome, GraphGenerator};
