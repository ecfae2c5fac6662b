//! Drill state type definitions
//!
//! The observable state of a session, the changes a presentation layer
//! subscribes to, and the token used for the delayed advance after a
//! correct answer.

use crate::note::{Clef, Difficulty, Note};
use serde::Serialize;
use std::time::Duration;

/// Answer feedback shown next to the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    #[default]
    None,
    Correct,
    Incorrect,
}

impl Feedback {
    pub fn symbol(&self) -> &'static str {
        match self {
            Feedback::None => " ",
            Feedback::Correct => "✅",
            Feedback::Incorrect => "❌",
        }
    }
}

/// Where a session sits in the drill loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No game started yet
    Idle,
    /// A note is shown and no answer has been scored for it
    AwaitingAnswer,
    /// Last answer was right; a deferred advance is pending
    FeedbackCorrect,
    /// Last answer was wrong; the same note stays up for a retry
    FeedbackIncorrect,
}

/// One-shot permission to advance the session after the feedback delay.
///
/// Only honoured while the session is still in the same game and on the same
/// note it was issued for. See [`DrillSession::fire`](super::DrillSession::fire).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredAdvance {
    pub(crate) generation: u64,
    pub(crate) serial: u64,
    pub delay: Duration,
}

/// A single field change, emitted in the order the fields are listed in [`Snapshot`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum StateChange {
    CurrentNote(Option<Note>),
    CurrentNoteOffset(f64),
    Score(u32),
    Feedback(Feedback),
    CurrentClef(Clef),
    Difficulty(Difficulty),
}

/// Everything a view needs to draw the drill
///
/// # Fields
/// - `current_note`: note on the staff, `None` before the first game
/// - `current_note_offset`: vertical offset of that note (0.0 while idle)
/// - `score`: correct answers since the game started
/// - `feedback`: result of the last answer for the current note
/// - `current_clef` / `difficulty`: the active game settings
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub current_note: Option<Note>,
    pub current_note_offset: f64,
    pub score: u32,
    pub feedback: Feedback,
    pub current_clef: Clef,
    pub difficulty: Difficulty,
}

impl Snapshot {
    /// Changes needed to turn `self` into `newer`
    pub fn diff(&self, newer: &Snapshot) -> Vec<StateChange> {
        let mut changes = Vec::new();
        if self.current_note != newer.current_note {
            changes.push(StateChange::CurrentNote(newer.current_note));
        }
        if self.current_note_offset != newer.current_note_offset {
            changes.push(StateChange::CurrentNoteOffset(newer.current_note_offset));
        }
        if self.score != newer.score {
            changes.push(StateChange::Score(newer.score));
        }
        if self.feedback != newer.feedback {
            changes.push(StateChange::Feedback(newer.feedback));
        }
        if self.current_clef != newer.current_clef {
            changes.push(StateChange::CurrentClef(newer.current_clef));
        }
        if self.difficulty != newer.difficulty {
            changes.push(StateChange::Difficulty(newer.difficulty));
        }
        changes
    }
}

/// Result of scoring one answer
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub correct: bool,
    pub changes: Vec<StateChange>,
    /// Present for correct answers: fire it after `delay` to move on
    pub deferred: Option<DeferredAdvance>,
}
