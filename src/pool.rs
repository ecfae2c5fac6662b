//! Difficulty pools: which notes are eligible for a drill at a given
//! difficulty and clef.
//!
//! - `Easy` uses a curated octave per clef, not derived from the table
//! - `Medium` keeps every table entry outside the outer ledger registers
//! - `Hard` is the whole table

use crate::note::NoteName::{Do, Fa, La, Mi, Re, Si, Sol};
use crate::note::{Clef, Difficulty, Note};
use crate::staff::{PositionTable, StaffPosition};

const TREBLE_EASY: [Note; 8] = [
    Note::new(Do, 0),
    Note::new(Re, 0),
    Note::new(Mi, 0),
    Note::new(Fa, 0),
    Note::new(Sol, 0),
    Note::new(La, 0),
    Note::new(Si, 0),
    Note::new(Do, 1),
];

const BASS_EASY: [Note; 8] = [
    Note::new(Sol, -1),
    Note::new(La, -1),
    Note::new(Si, -1),
    Note::new(Do, 0),
    Note::new(Re, 0),
    Note::new(Mi, 0),
    Note::new(Fa, 0),
    Note::new(Sol, 0),
];

/// Eligible positions for `(difficulty, clef)`, lowest pitch first. Never empty.
pub fn pool(difficulty: Difficulty, clef: Clef) -> Vec<StaffPosition> {
    let table = PositionTable::for_clef(clef);
    match difficulty {
        Difficulty::Easy => {
            let curated: &[Note] = match clef {
                Clef::Treble => &TREBLE_EASY,
                Clef::Bass => &BASS_EASY,
            };
            curated
                .iter()
                .filter_map(|&note| table.position(note))
                .collect()
        }
        Difficulty::Medium => table
            .positions()
            .filter(|position| !position.note.is_outer_ledger())
            .collect(),
        Difficulty::Hard => table.positions().collect(),
    }
}
