//! Repository reads using git2.

use std::path::{Path, PathBuf};

use git2::{Delta, Diff, DiffFormat, ErrorCode, Repository, Tree};
use tracing::debug;

use crate::error::{CommitError, GitError};

use super::VersionControl;
use super::executor::run_commit;

/// A work-tree repository discovered from a starting directory.
pub struct GitRepository {
    repo: Repository,
    workdir: PathBuf,
}

impl GitRepository {
    /// Discover the repository containing `path`, searching upward.
    pub fn discover(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let repo = Repository::discover(path).map_err(GitError::OpenRepository)?;
        let workdir = repo
            .workdir()
            .ok_or(GitError::BareRepository)?
            .to_path_buf();
        Ok(Self { repo, workdir })
    }

    /// Root of the work tree.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn staged(&self) -> Result<Diff<'_>, GitError> {
        let head_tree = resolve_head_tree(&self.repo)?;
        self.repo
            .diff_tree_to_index(head_tree.as_ref(), None, None)
            .map_err(GitError::DiffFailed)
    }
}

/// Resolve the HEAD tree, distinguishing empty-repo errors from real failures.
///
/// Returns `Ok(None)` for repos with no commits (unborn branch / not found),
/// so the staged diff is taken against the empty tree.
fn resolve_head_tree(repo: &Repository) -> Result<Option<Tree<'_>>, GitError> {
    let head_ref = match repo.head() {
        Ok(r) => r,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(None);
        }
        Err(e) => return Err(GitError::DiffFailed(e)),
    };

    let tree = head_ref.peel_to_tree().map_err(GitError::DiffFailed)?;
    Ok(Some(tree))
}

/// Render a diff as unified patch text, byte for byte.
fn patch_bytes(diff: &Diff<'_>) -> Result<Vec<u8>, GitError> {
    let mut out = Vec::new();
    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        let origin = line.origin();
        if origin == '+' || origin == '-' || origin == ' ' {
            out.push(origin as u8);
        }
        out.extend_from_slice(line.content());
        true
    })
    .map_err(GitError::DiffFailed)?;
    Ok(out)
}

impl VersionControl for GitRepository {
    fn staged_diff(&self) -> Result<Vec<u8>, GitError> {
        let diff = self.staged()?;
        patch_bytes(&diff)
    }

    fn added_paths(&self) -> Result<Vec<String>, GitError> {
        let diff = self.staged()?;
        let paths = diff
            .deltas()
            .filter(|delta| delta.status() == Delta::Added)
            .filter_map(|delta| {
                delta
                    .new_file()
                    .path()
                    .map(|p| p.to_string_lossy().to_string())
            })
            .collect();
        Ok(paths)
    }

    fn read_worktree_file(&self, path: &str) -> Result<Vec<u8>, GitError> {
        std::fs::read(self.workdir.join(path)).map_err(|source| GitError::ReadNewFile {
            path: path.to_string(),
            source,
        })
    }

    fn recent_messages(&self, count: usize) -> Result<String, GitError> {
        // push_head on an unborn branch fails with a generic error code
        match self.repo.head() {
            Ok(_) => {}
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                debug!("No commits yet, history sample is empty");
                return Ok(String::new());
            }
            Err(e) => return Err(GitError::HistoryFailed(e)),
        }

        let mut revwalk = self.repo.revwalk().map_err(GitError::HistoryFailed)?;
        revwalk.push_head().map_err(GitError::HistoryFailed)?;

        let mut messages = Vec::with_capacity(count);
        for oid in revwalk.take(count) {
            let oid = oid.map_err(GitError::HistoryFailed)?;
            let commit = self.repo.find_commit(oid).map_err(GitError::HistoryFailed)?;
            messages.push(String::from_utf8_lossy(commit.message_bytes()).to_string());
        }

        Ok(messages.join("\n"))
    }

    fn commit(&self, message: &str) -> Result<(), CommitError> {
        run_commit(&self.workdir, message)
    }
}
