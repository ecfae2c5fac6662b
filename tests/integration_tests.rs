//! Integration tests for the note drill
//!
//! Drives full games through the public API, from configuration to scoring.

use solfege::drill::{DrillSession, Phase};
use solfege::{
    pool, start_drill, Clef, Difficulty, DrillConfig, Feedback, Note, NoteName, PositionTable,
};
use std::collections::HashSet;

#[test]
fn test_easy_treble_example() {
    let easy: HashSet<Note> = pool(Difficulty::Easy, Clef::Treble)
        .into_iter()
        .map(|p| p.note)
        .collect();
    let mut expected: HashSet<Note> = NoteName::ALL.iter().map(|&n| Note::new(n, 0)).collect();
    expected.insert(Note::new(NoteName::Do, 1));
    assert_eq!(easy, expected);

    let table = PositionTable::for_clef(Clef::Treble);
    assert_eq!(table.offset(Note::new(NoteName::Do, 0)), Some(43.5));
    assert_eq!(table.offset(Note::new(NoteName::Si, 0)), Some(0.0));

    let mut session = DrillSession::seeded(2024);
    session.start_game(Difficulty::Easy, Clef::Treble);
    assert_eq!(session.score(), 0);
    assert!(easy.contains(&session.current_note().unwrap()));
}

#[test]
fn test_configured_drill() {
    let config = DrillConfig::from_yaml(
        r#"
clef: bass
difficulty: medium
feedback-delay-ms: 0
seed: 7
"#,
    )
    .unwrap();
    let mut session = start_drill(&config);
    assert_eq!(session.current_clef(), Clef::Bass);
    assert_eq!(session.difficulty(), Difficulty::Medium);
    assert_eq!(session.phase(), Phase::AwaitingAnswer);

    // answer everything right for two full cycles of the medium pool
    for round in 1..=38 {
        let name = session.current_note().unwrap().name;
        let answer = session.check_answer(name.label());
        assert!(answer.correct);
        assert_eq!(session.score(), round);

        let deferred = answer.deferred.unwrap();
        assert!(deferred.delay.is_zero());
        assert!(session.fire(deferred).is_some());
    }
}

#[test]
fn test_wrong_then_right() {
    let mut session = start_drill(&DrillConfig {
        seed: Some(1),
        ..Default::default()
    });
    let note = session.current_note().unwrap();
    let wrong = NoteName::ALL.iter().find(|&&n| n != note.name).unwrap();

    assert!(!session.check_answer(wrong.label()).correct);
    assert_eq!(session.feedback(), Feedback::Incorrect);
    assert!(!session.check_answer("nonsense").correct);
    assert_eq!(session.score(), 0);

    let answer = session.check_answer(note.name.label());
    assert!(answer.correct);
    assert_eq!(session.score(), 1);

    // a new game before the delay elapses swallows the pending advance
    session.start_game(Difficulty::Hard, Clef::Treble);
    let shown = session.current_note();
    assert!(session.fire(answer.deferred.unwrap()).is_none());
    assert_eq!(session.current_note(), shown);
    assert_eq!(session.score(), 0);
}
