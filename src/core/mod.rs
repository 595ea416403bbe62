// Rule-based text generation
pub mod advice;
pub mod summary;

pub use advice::{AdviceEngine, AdviceRule};
pub use summary::summarize;
