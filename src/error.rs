//! Error types for stagecraft modules using thiserror.

use thiserror::Error;

/// Errors from resolving configuration at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} environment variable is not set")]
    MissingCredential(&'static str),
}

/// Errors from reading the repository (diff, status, history, new files).
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository: {0}")]
    OpenRepository(#[source] git2::Error),

    #[error("Bare repositories are not supported")]
    BareRepository,

    #[error("Failed to get staged diff: {0}")]
    DiffFailed(#[source] git2::Error),

    #[error("Failed to get recent commits: {0}")]
    HistoryFailed(#[source] git2::Error),

    #[error("Failed to read staged file {path}: {source}")]
    ReadNewFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from assembling the staged change context.
#[derive(Error, Debug)]
pub enum ContextError {
    #[error("No staged changes found")]
    NoStagedChanges,

    #[error(transparent)]
    Git(#[from] GitError),
}

/// Errors from the generation backend.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Request to generation backend failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Request to generation backend timed out after {0} seconds")]
    Timeout(u64),

    #[error("Generation backend returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Failed to parse generation response: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    #[error("Empty response from generation backend")]
    EmptyGeneration,
}

/// Errors from the manual edit round-trip.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("EDITOR is set but empty")]
    NoEditor,

    #[error("Editor '{0}' not found in PATH")]
    NotFound(String),

    #[error("Failed to prepare temporary message file: {0}")]
    TempFile(#[source] std::io::Error),

    #[error("Failed to launch editor '{editor}': {source}")]
    SpawnFailed {
        editor: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Editor '{editor}' exited with {}", code.map_or("a signal".to_string(), |c| format!("code {c}")))]
    NonZeroExit { editor: String, code: Option<i32> },

    #[error("Failed to read edited message: {0}")]
    ReadBack(#[source] std::io::Error),
}

/// Errors from finalizing the commit.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("Failed to run git commit: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("git commit exited with {}: {stderr}", code.map_or("a signal".to_string(), |c| format!("code {c}")))]
    Failed { code: Option<i32>, stderr: String },
}

/// Errors from the interactive accept/edit/reject loop.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Error editing message: {0}")]
    Editor(#[from] EditorError),

    #[error("Terminal I/O failed: {0}")]
    Terminal(#[source] std::io::Error),
}

/// Any fatal error that ends a run.
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Context(#[from] ContextError),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Error committing changes: {0}")]
    Commit(#[from] CommitError),
}
