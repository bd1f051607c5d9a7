//! Staged change context: the diff plus full content of newly added files.

use tracing::debug;

use crate::error::ContextError;
use crate::git::VersionControl;

/// Everything that changed in the index, as one byte stream.
///
/// Holds the staged unified diff followed by one synthetic block per newly
/// added file. Never empty once constructed by [`collect_context`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffContext {
    bytes: Vec<u8>,
    new_files: Vec<String>,
}

impl DiffContext {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Lossy UTF-8 view for embedding in a text prompt.
    pub fn to_text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    /// Paths that received a synthetic block.
    pub fn new_files(&self) -> &[String] {
        &self.new_files
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Append a diff block that presents `content` as a file created from nothing.
fn append_new_file_block(out: &mut Vec<u8>, path: &str, content: &[u8]) {
    out.extend_from_slice(format!("\n--- /dev/null\n+++ b/{path}\n").as_bytes());
    out.extend_from_slice(content);
}

/// Collect the staged change set from the repository.
///
/// Reads the staged diff, then appends the current on-disk content of every
/// staged addition. Fails with [`ContextError::NoStagedChanges`] when both
/// are empty, and with a read error if any new file cannot be read; in
/// either case nothing partial is returned.
pub fn collect_context<V: VersionControl + ?Sized>(vcs: &V) -> Result<DiffContext, ContextError> {
    debug!("Getting git diff for staged changes...");
    let mut bytes = vcs.staged_diff()?;
    debug!("Diff length: {} bytes", bytes.len());
    debug!("Diff: {}", String::from_utf8_lossy(&bytes));

    debug!("Getting new staged files...");
    let new_files = vcs.added_paths()?;
    debug!("New staged files: {:?}", new_files);

    if bytes.is_empty() && new_files.is_empty() {
        return Err(ContextError::NoStagedChanges);
    }

    for path in &new_files {
        let content = vcs.read_worktree_file(path)?;
        append_new_file_block(&mut bytes, path, &content);
    }

    debug!("Final diff: {}", String::from_utf8_lossy(&bytes));

    Ok(DiffContext { bytes, new_files })
}
