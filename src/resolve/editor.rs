//! Manual message edits through an external editor.

use std::io::Write;
use std::process::Command;

use tracing::debug;

use crate::error::EditorError;

/// Trait for letting the user rewrite a message.
///
/// This abstraction allows the resolver to be tested without spawning an editor.
#[cfg_attr(test, mockall::automock)]
pub trait Editor {
    /// Present `initial` for editing and return the edited text verbatim.
    fn edit(&self, initial: &str) -> Result<String, EditorError>;
}

/// Runs the user's editor on a temporary file in the foreground.
#[derive(Debug, Clone)]
pub struct ExternalEditor {
    command: String,
}

impl ExternalEditor {
    /// `command` is a program name optionally followed by arguments,
    /// e.g. `vim` or `code --wait`.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl Editor for ExternalEditor {
    fn edit(&self, initial: &str) -> Result<String, EditorError> {
        let mut words = self.command.split_whitespace();
        let program = words.next().ok_or(EditorError::NoEditor)?;
        let args: Vec<&str> = words.collect();

        let resolved =
            which::which(program).map_err(|_| EditorError::NotFound(program.to_string()))?;

        let mut file = tempfile::Builder::new()
            .prefix("commit-msg-")
            .suffix(".txt")
            .tempfile()
            .map_err(EditorError::TempFile)?;
        file.write_all(initial.as_bytes())
            .map_err(EditorError::TempFile)?;
        file.flush().map_err(EditorError::TempFile)?;

        // Close our handle; the path is removed when `path` drops, on every return below.
        let path = file.into_temp_path();

        debug!("Opening {} with {}", path.display(), resolved.display());

        let status = Command::new(&resolved)
            .args(&args)
            .arg(&*path)
            .status()
            .map_err(|source| EditorError::SpawnFailed {
                editor: program.to_string(),
                source,
            })?;

        if !status.success() {
            return Err(EditorError::NonZeroExit {
                editor: program.to_string(),
                code: status.code(),
            });
        }

        std::fs::read_to_string(&path).map_err(EditorError::ReadBack)
    }
}
