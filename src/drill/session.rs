//! The drill session state machine.

use super::types::{Answer, DeferredAdvance, Feedback, Phase, Snapshot, StateChange};
use crate::config::DrillConfig;
use crate::note::{Clef, Difficulty, Note, NoteName};
use crate::pool::pool;
use crate::staff::StaffPosition;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// How long correct-answer feedback stays up before the next note
pub const FEEDBACK_DELAY: Duration = Duration::from_millis(300);

/// In-memory state of one drill. Single owner; nothing here is shared or persisted.
#[derive(Debug)]
pub struct DrillSession<R = StdRng> {
    difficulty: Difficulty,
    clef: Clef,
    score: u32,
    current: Option<StaffPosition>,
    feedback: Feedback,
    remaining: Vec<StaffPosition>,
    // bumped by every start_game
    generation: u64,
    // bumped by every advance
    serial: u64,
    feedback_delay: Duration,
    rng: R,
}

impl DrillSession<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible note order for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Session using the configured seed (if any) and feedback delay.
    /// The configured clef and difficulty are what [`DrillSession::start_configured`] plays.
    pub fn from_config(config: &DrillConfig) -> Self {
        let session = match config.seed {
            Some(seed) => Self::seeded(seed),
            None => Self::new(),
        };
        let mut session = session.with_feedback_delay(config.feedback_delay);
        session.difficulty = config.difficulty;
        session.clef = config.clef;
        session
    }
}

impl Default for DrillSession<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> DrillSession<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            difficulty: Difficulty::default(),
            clef: Clef::default(),
            score: 0,
            current: None,
            feedback: Feedback::None,
            remaining: Vec::new(),
            generation: 0,
            serial: 0,
            feedback_delay: FEEDBACK_DELAY,
            rng,
        }
    }

    pub fn with_feedback_delay(mut self, delay: Duration) -> Self {
        self.feedback_delay = delay;
        self
    }

    /// Reset the score and bag, switch to `difficulty`/`clef` and show the first note.
    pub fn start_game(&mut self, difficulty: Difficulty, clef: Clef) -> Vec<StateChange> {
        let before = self.snapshot();

        self.difficulty = difficulty;
        self.clef = clef;
        self.score = 0;
        self.remaining.clear();
        self.generation += 1;
        info!("Starting {} drill on the {} clef", difficulty, clef);

        self.advance();
        before.diff(&self.snapshot())
    }

    /// Start a game with the session's current difficulty and clef
    pub fn start_configured(&mut self) -> Vec<StateChange> {
        self.start_game(self.difficulty, self.clef)
    }

    /// Draw the next note from the bag, refilling it with a fresh shuffle of the
    /// pool when it runs out. Clears the feedback.
    pub fn advance(&mut self) -> Vec<StateChange> {
        let before = self.snapshot();

        if self.remaining.is_empty() {
            let mut bag = pool(self.difficulty, self.clef);
            bag.shuffle(&mut self.rng);
            debug!(
                "Refilled bag with {} notes ({} / {})",
                bag.len(),
                self.difficulty,
                self.clef
            );
            self.remaining = bag;
        }

        let next = match self.remaining.pop() {
            Some(next) => next,
            None => {
                warn!(
                    "No notes to draw for {} / {}; keeping the current note",
                    self.difficulty, self.clef
                );
                debug_assert!(false, "difficulty pools are never empty");
                return Vec::new();
            }
        };
        debug!("Next note {} at offset {}", next.note, next.offset);
        self.current = Some(next);
        self.serial += 1;
        self.feedback = Feedback::None;

        before.diff(&self.snapshot())
    }

    /// Score a typed answer label such as `"SOL"`. Anything that is not one of
    /// the seven labels is simply a wrong answer.
    pub fn check_answer(&mut self, candidate: &str) -> Answer {
        match NoteName::from_label(candidate) {
            Some(name) => self.check_note(name),
            None => {
                debug!("Unrecognised answer {:?}", candidate);
                self.score_answer(false)
            }
        }
    }

    /// Score an answer given as a note name (the octave never matters)
    pub fn check_note(&mut self, name: NoteName) -> Answer {
        let correct = self.current.map_or(false, |p| p.note.name == name);
        self.score_answer(correct)
    }

    fn score_answer(&mut self, correct: bool) -> Answer {
        let before = self.snapshot();

        let deferred = if correct {
            self.score += 1;
            self.feedback = Feedback::Correct;
            Some(DeferredAdvance {
                generation: self.generation,
                serial: self.serial,
                delay: self.feedback_delay,
            })
        } else {
            self.feedback = Feedback::Incorrect;
            None
        };

        Answer {
            correct,
            changes: before.diff(&self.snapshot()),
            deferred,
        }
    }

    /// Run a deferred advance. Returns `None` without touching the session when
    /// the token is stale: a new game started, or the note already moved on.
    pub fn fire(&mut self, token: DeferredAdvance) -> Option<Vec<StateChange>> {
        if token.generation != self.generation || token.serial != self.serial {
            debug!(
                "Dropping stale advance (game {}, note {}; now game {}, note {})",
                token.generation, token.serial, self.generation, self.serial
            );
            return None;
        }
        Some(self.advance())
    }

    pub fn phase(&self) -> Phase {
        match (self.current, self.feedback) {
            (None, _) => Phase::Idle,
            (Some(_), Feedback::None) => Phase::AwaitingAnswer,
            (Some(_), Feedback::Correct) => Phase::FeedbackCorrect,
            (Some(_), Feedback::Incorrect) => Phase::FeedbackIncorrect,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            current_note: self.current_note(),
            current_note_offset: self.current_note_offset(),
            score: self.score,
            feedback: self.feedback,
            current_clef: self.clef,
            difficulty: self.difficulty,
        }
    }

    pub fn current_note(&self) -> Option<Note> {
        self.current.map(|p| p.note)
    }

    pub fn current_note_offset(&self) -> f64 {
        self.current.map_or(0.0, |p| p.offset)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    pub fn current_clef(&self) -> Clef {
        self.clef
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Notes left in the bag before the next reshuffle
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }
}
