//! Version-control collaborator: staged diff, new files, history, and commit.

pub mod executor;
pub mod repository;

use crate::error::{CommitError, GitError};

pub use executor::run_commit;
pub use repository::GitRepository;

/// The narrow set of repository operations a run needs.
///
/// Everything except [`VersionControl::commit`] is read-only. This abstraction
/// allows the pipeline to be exercised with fakes instead of a real repository.
#[cfg_attr(test, mockall::automock)]
pub trait VersionControl {
    /// Unified diff of all staged changes relative to HEAD.
    fn staged_diff(&self) -> Result<Vec<u8>, GitError>;

    /// Paths staged with "added" status, in index order.
    fn added_paths(&self) -> Result<Vec<String>, GitError>;

    /// Current on-disk content of a path relative to the work tree.
    fn read_worktree_file(&self, path: &str) -> Result<Vec<u8>, GitError>;

    /// Raw text of the last `count` commit messages, newest first.
    fn recent_messages(&self, count: usize) -> Result<String, GitError>;

    /// Create a commit from the index with the given message.
    fn commit(&self, message: &str) -> Result<(), CommitError>;
}
