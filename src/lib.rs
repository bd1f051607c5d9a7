//! stagecraft - draft a commit message for staged changes with Claude.
//!
//! # Overview
//!
//! stagecraft reads the staged diff (plus the full content of newly added
//! files) and the last few commit messages, asks the Anthropic Messages API
//! for a conventional commit message, then lets the user accept it, edit it
//! in `$EDITOR`, or reject it. Accepted messages are committed with
//! `git commit`.

pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod llm;
pub mod pipeline;
pub mod resolve;

// Re-export commonly used types
pub use commit::{DiffContext, GenerationRequest, HistorySample};
pub use config::Config;
pub use error::{
    CommitError, ConfigError, ContextError, EditorError, GenerationError, GitError, ResolveError,
    RunError,
};
pub use git::{GitRepository, VersionControl};
pub use llm::{AnthropicClient, GenerationResult, MessageGenerator};
pub use pipeline::{Outcome, run};
pub use resolve::{Editor, ExternalEditor, Resolution, ResolutionChoice};
