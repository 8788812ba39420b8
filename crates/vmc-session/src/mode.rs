//! Form mode state machine.

use std::fmt;

/// Whether the form is being edited, waiting on a submit, or showing results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Editing,
    Submitting,
    Shown,
}

/// Something that happened to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeEvent {
    /// A field value changed.
    Edited,
    /// The result set was emptied by a filter change or blank search.
    Cleared,
    SubmitStarted,
    SubmitSucceeded,
    SubmitFailed,
    SearchSucceeded,
    SearchFailed,
}

impl Mode {
    /// Next mode after `event`.
    #[must_use]
    pub fn on(self, event: ModeEvent) -> Mode {
        match (self, event) {
            (_, ModeEvent::Edited | ModeEvent::Cleared | ModeEvent::SearchFailed) => Mode::Editing,
            (Mode::Editing, ModeEvent::SubmitStarted) => Mode::Submitting,
            (Mode::Submitting, ModeEvent::SubmitSucceeded) => Mode::Shown,
            (Mode::Submitting, ModeEvent::SubmitFailed) => Mode::Editing,
            (_, ModeEvent::SearchSucceeded) => Mode::Shown,
            (mode, _) => mode,
        }
    }

    /// Whether the submit action is enabled.
    pub fn accepts_submit(&self) -> bool {
        matches!(self, Mode::Editing)
    }

    /// Caption of the submit button.
    pub fn submit_label(&self) -> &'static str {
        match self {
            Mode::Editing => "Submit",
            Mode::Submitting => "Submitting...",
            Mode::Shown => "Results Displayed",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Editing => "editing",
            Mode::Submitting => "submitting",
            Mode::Shown => "shown",
        })
    }
}
