//! Prompt construction for AI-generated commit messages.

use crate::commit::context::DiffContext;
use crate::commit::history::HistorySample;

/// A single user-role prompt ready to send to the generation backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    prompt: String,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

/// Build the LLM prompt for generating a commit message.
///
/// Pure: the same history and context always produce the same text. The diff
/// is embedded whole; size limits are the backend's concern.
pub fn build_commit_prompt(history: &HistorySample, context: &DiffContext) -> GenerationRequest {
    let recent_commits = history.as_str();
    let diff = context.to_text();

    GenerationRequest::new(format!(
        r#"You are generating a Git commit message in the Conventional Commits style.

## Structure Rules
1. First line: `type: short description`. Type is one of feat, fix, docs, style, refactor, perf, test, chore.
2. Optional body of bullet points, only if more context helps:
   - Separate the body from the first line with exactly one blank line
   - Keep bullets short and direct
   - Say what changed, do not over-explain
   - Drop fluffy or formal language

Return ONLY the commit message: no introduction, no explanation, no quotes around it.

## Examples
feat: add user auth system

- Add JWT tokens for API auth
- Handle token refresh for long sessions

fix: resolve memory leak in worker pool

- Clean up idle connections
- Add timeout for stale workers

IMPORTANT: Never respond with either example above. Base the message on the diff below, with style informed by the recent commits.

## Recent Commits (style reference)
{recent_commits}

## Diff
{diff}"#
    ))
}
