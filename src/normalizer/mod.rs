// Fragment normalizer - turns raw snippets into parseable compilation units

pub mod classify;
pub mod mask;
pub mod normalize;

pub use classify::{classify_and_wrap, Candidate, WrapStrategy};
pub use mask::{mask_literals, unmask_literals, MaskedText};
pub use normalize::{normalize, Strictness};
