//! End-to-end run: context, history, prompt, generation, resolution, commit.

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::commit::{build_commit_prompt, collect_context, sample_history};
use crate::error::RunError;
use crate::git::VersionControl;
use crate::llm::MessageGenerator;
use crate::resolve::{Editor, Resolution, Resolver};

/// How a successful run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A commit was created with this message.
    Committed(String),
    /// The user rejected the message; nothing was committed.
    Rejected,
}

/// Run the whole workflow once.
///
/// The staged context is collected before anything else so an empty change
/// set never reaches the generator. At most one commit is made, and only
/// after the user accepts (directly or by editing).
pub async fn run<V, G, E, R, W>(
    vcs: &V,
    generator: &G,
    editor: &E,
    input: R,
    mut output: W,
) -> Result<Outcome, RunError>
where
    V: VersionControl + ?Sized,
    G: MessageGenerator + ?Sized,
    E: Editor + ?Sized,
    R: BufRead,
    W: Write,
{
    let context = collect_context(vcs)?;
    debug!(
        "Staged context: {} bytes, {} new files",
        context.len(),
        context.new_files().len()
    );
    let history = sample_history(vcs)?;

    let request = build_commit_prompt(&history, &context);
    debug!("Commit prompt length: {} chars", request.prompt().len());

    let generated = generator.generate(&request).await?;

    let resolution = Resolver::new(editor, input, &mut output).resolve(generated.into_message())?;

    match resolution {
        Resolution::Accepted(message) => {
            debug!("Running git commit");
            vcs.commit(&message)?;
            if let Err(e) = writeln!(output, "Changes committed successfully!") {
                warn!("Commit succeeded but the confirmation could not be written: {e}");
            }
            Ok(Outcome::Committed(message))
        }
        Resolution::Rejected => Ok(Outcome::Rejected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    use mockall::predicate::eq;

    use crate::commit::HISTORY_SAMPLE_SIZE;
    use crate::error::{CommitError, ContextError, GenerationError};
    use crate::git::MockVersionControl;
    use crate::llm::client::MockMessageGenerator;
    use crate::llm::parse_response;
    use crate::resolve::editor::MockEditor;

    fn staged_vcs(diff: &'static str) -> MockVersionControl {
        let mut vcs = MockVersionControl::new();
        vcs.expect_staged_diff()
            .returning(move || Ok(diff.as_bytes().to_vec()));
        vcs.expect_added_paths().returning(|| Ok(Vec::new()));
        vcs.expect_recent_messages()
            .with(eq(HISTORY_SAMPLE_SIZE))
            .returning(|_| Ok(String::new()));
        vcs
    }

    fn generator_returning(body: &'static str) -> MockMessageGenerator {
        let mut generator = MockMessageGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .returning(move |_| parse_response(body));
        generator
    }

    #[tokio::test]
    async fn test_accept_commits_generated_message() {
        let mut vcs = staged_vcs("diff --git a/a.txt b/a.txt\n-1\n+2\n");
        vcs.expect_commit()
            .with(eq("fix: correct off-by-one in a.txt"))
            .times(1)
            .returning(|_| Ok(()));
        let generator =
            generator_returning(r#"{"content":[{"text":"fix: correct off-by-one in a.txt"}]}"#);
        let mut editor = MockEditor::new();
        editor.expect_edit().never();

        let mut output = Vec::new();
        let outcome = run(&vcs, &generator, &editor, Cursor::new("a\n"), &mut output)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::Committed("fix: correct off-by-one in a.txt".to_string())
        );
        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("\nfix: correct off-by-one in a.txt\n"));
        assert!(transcript.ends_with("Changes committed successfully!\n"));
    }

    #[tokio::test]
    async fn test_empty_change_set_never_calls_generator() {
        let mut vcs = MockVersionControl::new();
        vcs.expect_staged_diff().returning(|| Ok(Vec::new()));
        vcs.expect_added_paths().returning(|| Ok(Vec::new()));
        vcs.expect_recent_messages().never();
        vcs.expect_commit().never();
        let mut generator = MockMessageGenerator::new();
        generator.expect_generate().never();
        let editor = MockEditor::new();

        let mut output = Vec::new();
        let result = run(&vcs, &generator, &editor, Cursor::new("a\n"), &mut output).await;

        assert!(matches!(
            result,
            Err(RunError::Context(ContextError::NoStagedChanges))
        ));
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn test_empty_generation_shows_no_prompt() {
        let mut vcs = staged_vcs("+x\n");
        vcs.expect_commit().never();
        let generator = generator_returning(r#"{"content":[]}"#);
        let editor = MockEditor::new();

        let mut output = Vec::new();
        let result = run(&vcs, &generator, &editor, Cursor::new("a\n"), &mut output).await;

        assert!(matches!(
            result,
            Err(RunError::Generation(GenerationError::EmptyGeneration))
        ));
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn test_reject_never_commits() {
        let mut vcs = staged_vcs("+x\n");
        vcs.expect_commit().never();
        let generator = generator_returning(r#"{"content":[{"text":"chore: tidy"}]}"#);
        let editor = MockEditor::new();

        let outcome = run(&vcs, &generator, &editor, Cursor::new("reject\n"), Vec::new())
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::Rejected);
    }

    #[tokio::test]
    async fn test_edit_commits_edited_text() {
        let mut vcs = staged_vcs("+x\n");
        vcs.expect_commit()
            .with(eq("docs: rewritten by hand\n"))
            .times(1)
            .returning(|_| Ok(()));
        let generator = generator_returning(r#"{"content":[{"text":"docs: draft"}]}"#);
        let mut editor = MockEditor::new();
        editor
            .expect_edit()
            .with(eq("docs: draft"))
            .times(1)
            .returning(|_| Ok("docs: rewritten by hand\n".to_string()));

        let outcome = run(&vcs, &generator, &editor, Cursor::new("e\n"), Vec::new())
            .await
            .unwrap();
        assert_eq!(
            outcome,
            Outcome::Committed("docs: rewritten by hand\n".to_string())
        );
    }

    #[tokio::test]
    async fn test_garbage_then_accept_commits_once() {
        let mut vcs = staged_vcs("+x\n");
        vcs.expect_commit().times(1).returning(|_| Ok(()));
        let generator = generator_returning(r#"{"content":[{"text":"feat: thing"}]}"#);
        let editor = MockEditor::new();

        let input = "x\ny\nz\nnope\n\na\n";
        let outcome = run(&vcs, &generator, &editor, Cursor::new(input), Vec::new())
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::Committed("feat: thing".to_string()));
    }

    #[tokio::test]
    async fn test_commit_failure_is_fatal() {
        let mut vcs = staged_vcs("+x\n");
        vcs.expect_commit().times(1).returning(|_| {
            Err(CommitError::Failed {
                code: Some(1),
                stderr: "pre-commit hook failed".to_string(),
            })
        });
        let generator = generator_returning(r#"{"content":[{"text":"feat: thing"}]}"#);
        let editor = MockEditor::new();

        let mut output = Vec::new();
        let result = run(&vcs, &generator, &editor, Cursor::new("a\n"), &mut output).await;

        assert!(matches!(result, Err(RunError::Commit(_))));
        let transcript = String::from_utf8(output).unwrap();
        assert!(!transcript.contains("Changes committed successfully!"));
    }

    #[tokio::test]
    async fn test_prompt_carries_history_and_new_file() {
        let mut vcs = MockVersionControl::new();
        vcs.expect_staged_diff().returning(|| Ok(Vec::new()));
        vcs.expect_added_paths()
            .returning(|| Ok(vec!["b.txt".to_string()]));
        vcs.expect_read_worktree_file()
            .returning(|_| Ok(b"hello".to_vec()));
        vcs.expect_recent_messages()
            .returning(|_| Ok("style: earlier\n".to_string()));
        vcs.expect_commit().never();

        let mut generator = MockMessageGenerator::new();
        generator
            .expect_generate()
            .withf(|request| {
                request.prompt().contains("style: earlier")
                    && request
                        .prompt()
                        .contains("--- /dev/null\n+++ b/b.txt\nhello")
            })
            .times(1)
            .returning(|_| parse_response(r#"{"content":[{"text":"feat: add b.txt"}]}"#));
        let editor = MockEditor::new();

        let outcome = run(&vcs, &generator, &editor, Cursor::new("r\n"), Vec::new())
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::Rejected);
    }
}
