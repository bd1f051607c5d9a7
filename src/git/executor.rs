//! Commit creation through the system `git` binary.
//!
//! Hooks, signing, and identity all come from the user's git config.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::CommitError;

/// Run `git commit -m <message>` inside `workdir`.
///
/// The message is passed as a single argument and never goes through a shell.
pub fn run_commit(workdir: &Path, message: &str) -> Result<(), CommitError> {
    debug!("Running git commit in {}", workdir.display());

    let output = Command::new("git")
        .args(["commit", "-m", message])
        .current_dir(workdir)
        .output()
        .map_err(CommitError::SpawnFailed)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        // "nothing to commit" goes to stdout
        let detail = if stderr.trim().is_empty() {
            stdout.trim().to_string()
        } else {
            stderr.trim().to_string()
        };
        return Err(CommitError::Failed {
            code: output.status.code(),
            stderr: detail,
        });
    }

    Ok(())
}
