//! Recent commit messages as a style reference.

use tracing::debug;

use crate::error::GitError;
use crate::git::VersionControl;

/// Number of recent commit messages sampled for style.
pub const HISTORY_SAMPLE_SIZE: usize = 3;

/// Raw text of the most recent commit messages. Never parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistorySample(String);

impl HistorySample {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Sample the last [`HISTORY_SAMPLE_SIZE`] commit messages.
///
/// A repository with fewer (or no) commits yields a shorter sample.
pub fn sample_history<V: VersionControl + ?Sized>(vcs: &V) -> Result<HistorySample, GitError> {
    debug!("Getting recent commits...");
    let text = vcs.recent_messages(HISTORY_SAMPLE_SIZE)?;
    debug!("Recent commits length: {} bytes", text.len());
    Ok(HistorySample(text))
}
