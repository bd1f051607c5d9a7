//! Accept/edit/reject state machine, free of I/O.

/// What the user asked for at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionChoice {
    Accept,
    Edit,
    Reject,
}

impl ResolutionChoice {
    /// Classify one line of input. Case-insensitive, surrounding whitespace
    /// ignored, single letter or full word. Returns `None` for anything else.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "a" | "accept" => Some(Self::Accept),
            "e" | "edit" => Some(Self::Edit),
            "r" | "reject" => Some(Self::Reject),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Prompted,
    Editing,
    Accepted,
    Rejected,
}

impl State {
    pub fn is_terminal(self) -> bool {
        matches!(self, State::Accepted | State::Rejected)
    }
}

/// Inputs that drive the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A line was read at the prompt; `None` when it was not a valid choice.
    Input(Option<ResolutionChoice>),
    /// The editor round-trip finished and the message was replaced.
    EditFinished,
}

/// Compute the next state. Events that do not apply leave the state as is.
pub fn transition(state: State, event: Event) -> State {
    match (state, event) {
        (State::Prompted, Event::Input(Some(ResolutionChoice::Accept))) => State::Accepted,
        (State::Prompted, Event::Input(Some(ResolutionChoice::Edit))) => State::Editing,
        (State::Prompted, Event::Input(Some(ResolutionChoice::Reject))) => State::Rejected,
        (State::Prompted, Event::Input(None)) => State::Prompted,
        (State::Editing, Event::EditFinished) => State::Accepted,
        (state, _) => state,
    }
}
