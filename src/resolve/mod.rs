//! Interactive accept/edit/reject loop for a proposed commit message.

pub mod editor;
pub mod state;

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::error::ResolveError;

pub use editor::{Editor, ExternalEditor};
pub use state::{Event, ResolutionChoice, State, transition};

const RULE: &str = "------------------";

/// How the loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Commit with this exact message.
    Accepted(String),
    /// Exit without committing.
    Rejected,
}

/// Drives [`State`] from user input, delegating edits to an [`Editor`].
///
/// Reads choices from `input` one line at a time and writes the transcript to
/// `output`. Invalid choices re-prompt; only editor and terminal failures end
/// the loop with an error.
pub struct Resolver<'e, E: Editor + ?Sized, R, W> {
    editor: &'e E,
    input: R,
    output: W,
}

impl<'e, E, R, W> Resolver<'e, E, R, W>
where
    E: Editor + ?Sized,
    R: BufRead,
    W: Write,
{
    pub fn new(editor: &'e E, input: R, output: W) -> Self {
        Self {
            editor,
            input,
            output,
        }
    }

    /// Run the loop to a terminal state, starting from the generated message.
    pub fn resolve(&mut self, generated: String) -> Result<Resolution, ResolveError> {
        let mut message = generated;

        self.say(&format!(
            "\nSuggested commit message:\n{RULE}\n{message}\n{RULE}\n\nDo you want to (a)ccept, (e)dit, or (r)eject this message? "
        ))?;

        let mut state = State::Prompted;
        while !state.is_terminal() {
            state = match state {
                State::Prompted => match self.read_line()? {
                    Some(line) => {
                        let choice = ResolutionChoice::parse(&line);
                        if choice.is_none() {
                            debug!("Invalid choice {:?}", line.trim());
                            self.say(
                                "Invalid choice. Please enter (a)ccept, (e)dit, or (r)eject: ",
                            )?;
                        }
                        transition(state, Event::Input(choice))
                    }
                    None => {
                        warn!("Input closed before a choice was made");
                        self.say("\n")?;
                        State::Rejected
                    }
                },
                State::Editing => {
                    debug!("Editing commit message");
                    message = self.editor.edit(&message)?;
                    transition(state, Event::EditFinished)
                }
                State::Accepted | State::Rejected => state,
            };
        }

        if state == State::Accepted {
            debug!("Accepting commit message");
            return Ok(Resolution::Accepted(message));
        }

        debug!("Rejecting commit message");
        self.say("Commit message rejected. Exiting without committing.\n")?;
        Ok(Resolution::Rejected)
    }

    /// Read one line; `None` at end of input.
    ///
    /// Bytes that are not UTF-8 are replaced, so they fall through to the
    /// invalid-choice prompt instead of failing the read.
    fn read_line(&mut self) -> Result<Option<String>, ResolveError> {
        let mut buf = Vec::new();
        let read = self
            .input
            .read_until(b'\n', &mut buf)
            .map_err(ResolveError::Terminal)?;
        Ok((read > 0).then(|| String::from_utf8_lossy(&buf).into_owned()))
    }

    fn say(&mut self, text: &str) -> Result<(), ResolveError> {
        self.output
            .write_all(text.as_bytes())
            .and_then(|()| self.output.flush())
            .map_err(ResolveError::Terminal)
    }
}
