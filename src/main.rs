//! stagecraft - CLI entry point.

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use stagecraft::{AnthropicClient, Config, ExternalEditor, GitRepository, Outcome, run};

/// Draft a commit message for staged changes using Claude.
#[derive(Parser, Debug)]
#[command(name = "stagecraft")]
#[command(about = "Draft a commit message for staged changes using Claude")]
#[command(version)]
struct Cli {
    /// Print diagnostic output to stderr
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    // Step 1: Credential check before touching the repository or network
    let config = Config::from_env().context("Missing configuration")?;
    debug!("Config: {:?}", config);

    // Step 2: Collaborators
    let repo = GitRepository::discover(".")
        .context("Not a git repository. Run stagecraft from within a git work tree.")?;
    let client = AnthropicClient::new(&config).context("Failed to set up the API client")?;
    let editor = ExternalEditor::new(&config.editor);

    // Step 3: Run the workflow; prompts and transcript go to stderr
    let outcome = run(&repo, &client, &editor, io::stdin().lock(), io::stderr())
        .await
        .context("Commit workflow failed")?;

    match outcome {
        Outcome::Committed(message) => debug!("Committed: {:?}", message),
        Outcome::Rejected => debug!("Exited without committing"),
    }

    Ok(())
}

/// Send diagnostics to stderr. `--debug` always wins; otherwise `RUST_LOG`
/// is honoured and the default is warnings only.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("stagecraft=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
