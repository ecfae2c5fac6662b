//! # Drill Module
//!
//! The note-reading game: a session shows one note at a time, scores the
//! player's answer and moves on.
//!
//! ## Sub-modules
//! - `types` - Feedback, Phase, Snapshot, StateChange, DeferredAdvance
//! - `session` - The `DrillSession` state machine
//!
//! ## State Machine
//! ```text
//! Idle ──start_game──▶ AwaitingAnswer ──correct──▶ FeedbackCorrect ──fire──▶ AwaitingAnswer
//!                           │    ▲
//!                      incorrect │ (next scoring event or start_game)
//!                           ▼    │
//!                      FeedbackIncorrect
//! ```
//!
//! ## Shuffled Bag
//! Notes are drawn without replacement from a shuffled copy of the pool. The
//! bag refills when empty, so every note of the pool appears once per cycle.
//! The last note of one cycle may equal the first note of the next.
//!
//! ## Deferred Advance
//! A correct answer does not move on immediately. The session hands back a
//! [`DeferredAdvance`] and the caller fires it after `delay`. Tokens issued
//! before a `start_game`, or before some other advance, are ignored when fired.
//!
//! ## Example
//! ```rust
//! use solfege::drill::{DrillSession, Feedback};
//! use solfege::{Clef, Difficulty};
//!
//! let mut session = DrillSession::seeded(7);
//! session.start_game(Difficulty::Easy, Clef::Treble);
//!
//! let answer = session.current_note().unwrap().name.label();
//! let result = session.check_answer(answer);
//! assert!(result.correct);
//! assert_eq!(session.score(), 1);
//! assert_eq!(session.feedback(), Feedback::Correct);
//!
//! // ...after result.deferred.unwrap().delay has elapsed
//! assert!(session.fire(result.deferred.unwrap()).is_some());
//! assert_eq!(session.feedback(), Feedback::None);
//! ```

mod session;
mod types;


pub use session::{DrillSession, FEEDBACK_DELAY};
pub use types::{Answer, DeferredAdvance, Feedback, Phase, Snapshot, StateChange};
