//! Staged change context, style history, and the generation prompt.

pub mod context;
pub mod history;
pub mod prompt;

pub use context::{DiffContext, collect_context};
pub use history::{HISTORY_SAMPLE_SIZE, HistorySample, sample_history};
pub use prompt::{GenerationRequest, build_commit_prompt};
