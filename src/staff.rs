//! # Staff Geometry
//!
//! Position tables mapping each drillable note to its vertical offset on a
//! five-line staff, plus ledger-line placement and a plain-text staff renderer.
//!
//! ## Offsets
//! - Offset 0.0 is the middle staff line; positive offsets are further DOWN
//! - Adjacent line/space positions are [`STAFF_STEP`] (7.25) apart
//! - The five staff lines sit at -29.0, -14.5, 0.0, 14.5 and 29.0
//! - Ledger lines start at ±43.5 and repeat every 14.5 units outwards
//!
//! ## Tables
//! | Clef   | Lowest          | Highest          | Middle line |
//! |--------|-----------------|------------------|-------------|
//! | treble | `DO_G2` (94.25) | `SOL_A2` (-87.0) | `SI`        |
//! | bass   | `DO_G3` (108.75)| `SI_A` (-87.0)   | `RÉ`        |
//!
//! Entries are listed lowest pitch first, so table order is pitch order. Tier
//! names follow the ledger regions and do not roll over at DO (`RÉ_G2` is
//! followed by `MI_G`). Offsets strictly decrease along the table, one
//! [`STAFF_STEP`] per entry. [`PositionTable::validate`] checks it.

use crate::error::SolfegeError;
use crate::note::{Clef, Note, NoteName};
use crate::note::NoteName::{Do, Fa, La, Mi, Re, Si, Sol};
use serde::Serialize;
use std::collections::HashSet;

/// Distance between a staff line and the adjacent space
pub const STAFF_STEP: f64 = 7.25;

/// Half-step index of the outermost staff line (lines at -4, -2, 0, 2, 4)
const STAFF_HALF_SPAN: i32 = 4;

const fn n(name: NoteName, ledger_tier: i8) -> Note {
    Note::new(name, ledger_tier)
}

const TREBLE_POSITIONS: [(Note, f64); 26] = [
    (n(Do, -2), 94.25),
    (n(Re, -2), 87.0),
    (n(Mi, -1), 79.75),
    (n(Fa, -1), 72.5),
    (n(Sol, -1), 65.25),
    (n(La, -1), 58.0),
    (n(Si, -1), 50.75),
    (n(Do, 0), 43.5),
    (n(Re, 0), 36.25),
    (n(Mi, 0), 29.0),
    (n(Fa, 0), 21.75),
    (n(Sol, 0), 14.5),
    (n(La, 0), 7.25),
    (n(Si, 0), 0.0),
    (n(Do, 1), -7.25),
    (n(Re, 1), -14.5),
    (n(Mi, 1), -21.75),
    (n(Fa, 1), -29.0),
    (n(Sol, 1), -36.25),
    (n(La, 1), -43.5),
    (n(Si, 1), -50.75),
    (n(Do, 2), -58.0),
    (n(Re, 2), -65.25),
    (n(Mi, 2), -72.5),
    (n(Fa, 2), -79.75),
    (n(Sol, 2), -87.0),
];

const BASS_POSITIONS: [(Note, f64); 28] = [
    (n(Do, -3), 108.75),
    (n(Re, -3), 101.5),
    (n(Mi, -2), 94.25),
    (n(Fa, -2), 87.0),
    (n(Sol, -2), 79.75),
    (n(La, -2), 72.5),
    (n(Si, -2), 65.25),
    (n(Do, -2), 58.0),
    (n(Re, -2), 50.75),
    (n(Mi, -1), 43.5),
    (n(Fa, -1), 36.25),
    (n(Sol, -1), 29.0),
    (n(La, -1), 21.75),
    (n(Si, -1), 14.5),
    (n(Do, 0), 7.25),
    (n(Re, 0), 0.0),
    (n(Mi, 0), -7.25),
    (n(Fa, 0), -14.5),
    (n(Sol, 0), -21.75),
    (n(La, 0), -29.0),
    (n(Si, 0), -36.25),
    (n(Do, 1), -43.5),
    (n(Re, 1), -50.75),
    (n(Mi, 1), -58.0),
    (n(Fa, 1), -65.25),
    (n(Sol, 1), -72.5),
    (n(La, 1), -79.75),
    (n(Si, 1), -87.0),
];

/// A note together with where it is drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StaffPosition {
    pub note: Note,
    pub offset: f64,
}

/// Immutable note-to-offset table for one clef, ordered from lowest to highest pitch
#[derive(Debug, Clone, Copy)]
pub struct PositionTable {
    clef: Clef,
    entries: &'static [(Note, f64)],
}

impl PositionTable {
    pub fn for_clef(clef: Clef) -> Self {
        let entries: &'static [(Note, f64)] = match clef {
            Clef::Treble => &TREBLE_POSITIONS,
            Clef::Bass => &BASS_POSITIONS,
        };
        Self { clef, entries }
    }

    pub fn clef(&self) -> Clef {
        self.clef
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Vertical offset of `note`, or `None` if the note is off this staff's range
    pub fn offset(&self, note: Note) -> Option<f64> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == note)
            .map(|(_, offset)| *offset)
    }

    /// Resolve a note to its staff position
    pub fn position(&self, note: Note) -> Option<StaffPosition> {
        self.offset(note).map(|offset| StaffPosition { note, offset })
    }

    /// All positions, lowest pitch first
    pub fn positions(&self) -> impl Iterator<Item = StaffPosition> + '_ {
        self.entries
            .iter()
            .map(|&(note, offset)| StaffPosition { note, offset })
    }

    /// Check that every note appears once and that offsets fall by exactly one
    /// [`STAFF_STEP`] from each entry to the next, in table order.
    pub fn validate(&self) -> Result<(), SolfegeError> {
        if self.entries.is_empty() {
            return Err(self.table_error("table is empty".to_string()));
        }

        let mut seen = HashSet::new();
        for (note, _) in self.entries {
            if !seen.insert(*note) {
                return Err(self.table_error(format!("{} appears more than once", note)));
            }
        }

        for pair in self.entries.windows(2) {
            let (lower, lower_offset) = pair[0];
            let (upper, upper_offset) = pair[1];

            if upper_offset >= lower_offset {
                return Err(self.table_error(format!(
                    "offset of {} ({}) is not above {} ({})",
                    upper, upper_offset, lower, lower_offset
                )));
            }
            if (lower_offset - upper_offset - STAFF_STEP).abs() > f64::EPSILON {
                return Err(self.table_error(format!(
                    "{} and {} are {} apart, expected {}",
                    lower,
                    upper,
                    lower_offset - upper_offset,
                    STAFF_STEP
                )));
            }
        }

        Ok(())
    }

    fn table_error(&self, message: String) -> SolfegeError {
        SolfegeError::TableError {
            clef: self.clef.to_string(),
            message,
        }
    }
}

fn half_steps(offset: f64) -> i32 {
    (offset / STAFF_STEP).round() as i32
}

/// Ledger lines needed to draw a note at `offset`, nearest the staff first.
///
/// ```
/// use solfege::staff::ledger_lines;
///
/// assert!(ledger_lines(0.0).is_empty());
/// assert_eq!(ledger_lines(58.0), vec![43.5, 58.0]);
/// assert_eq!(ledger_lines(-50.75), vec![-43.5]);
/// ```
pub fn ledger_lines(offset: f64) -> Vec<f64> {
    let target = half_steps(offset);
    let direction = target.signum();
    let mut lines = Vec::new();
    let mut row = STAFF_HALF_SPAN + 2;
    while row <= target.abs() {
        lines.push((direction * row) as f64 * STAFF_STEP);
        row += 2;
    }
    lines
}

const RENDER_WIDTH: usize = 21;
const NOTE_COLUMN: usize = RENDER_WIDTH / 2;

/// Draw the staff with a single note head at `offset` as plain text.
///
/// Each text row is one line or space position, top row highest in pitch.
/// The clef glyph marks the middle staff line.
pub fn render_staff(clef: Clef, offset: f64) -> String {
    let note_row = half_steps(offset);
    let ledgers: Vec<i32> = ledger_lines(offset).into_iter().map(half_steps).collect();
    let top = note_row.min(-STAFF_HALF_SPAN) - 1;
    let bottom = note_row.max(STAFF_HALF_SPAN) + 1;

    let mut out = String::new();
    for row in top..=bottom {
        let on_staff_line = row % 2 == 0 && row.abs() <= STAFF_HALF_SPAN;
        let mut cells = vec![if on_staff_line { '─' } else { ' ' }; RENDER_WIDTH];

        if ledgers.contains(&row) {
            for cell in &mut cells[NOTE_COLUMN - 2..=NOTE_COLUMN + 2] {
                *cell = '─';
            }
        }
        if row == note_row {
            cells[NOTE_COLUMN] = 'o';
        }

        out.push_str(if row == 0 { clef.glyph() } else { " " });
        out.extend(cells);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_valid() {
        assert!(PositionTable::for_clef(Clef::Treble).validate().is_ok());
        assert!(PositionTable::for_clef(Clef::Bass).validate().is_ok());
    }

    #[test]
    fn test_offsets_strictly_decrease_with_pitch() {
        for clef in [Clef::Treble, Clef::Bass] {
            let positions: Vec<_> = PositionTable::for_clef(clef).positions().collect();
            for pair in positions.windows(2) {
                assert!(pair[0].offset > pair[1].offset, "{} vs {}", pair[0].note, pair[1].note);
            }
        }
    }

    #[test]
    fn test_treble_reference_offsets() {
        let table = PositionTable::for_clef(Clef::Treble);
        assert_eq!(table.len(), 26);
        assert_eq!(table.offset(Note::new(NoteName::Do, 0)), Some(43.5));
        assert_eq!(table.offset(Note::new(NoteName::Si, 0)), Some(0.0));
        assert_eq!(table.offset(Note::new(NoteName::Do, -2)), Some(94.25));
        assert_eq!(table.offset(Note::new(NoteName::Sol, 2)), Some(-87.0));
        assert_eq!(table.offset(Note::new(NoteName::La, 2)), None);
    }

    #[test]
    fn test_bass_reference_offsets() {
        let table = PositionTable::for_clef(Clef::Bass);
        assert_eq!(table.len(), 28);
        assert_eq!(table.offset(Note::new(NoteName::Re, 0)), Some(0.0));
        assert_eq!(table.offset(Note::new(NoteName::Do, -3)), Some(108.75));
        assert_eq!(table.offset(Note::new(NoteName::Si, 1)), Some(-87.0));
    }

    #[test]
    fn test_tier_names_do_not_roll_over_at_do() {
        let table = PositionTable::for_clef(Clef::Treble);
        let positions: Vec<_> = table.positions().collect();
        let re_low = positions
            .iter()
            .position(|p| p.note == Note::new(NoteName::Re, -2))
            .unwrap();
        assert_eq!(positions[re_low + 1].note, Note::new(NoteName::Mi, -1));

        let bass: Vec<_> = PositionTable::for_clef(Clef::Bass).positions().collect();
        let si_low = bass
            .iter()
            .position(|p| p.note == Note::new(NoteName::Si, -2))
            .unwrap();
        assert_eq!(bass[si_low + 1].note, Note::new(NoteName::Do, -2));
        assert!(PositionTable::for_clef(Clef::Bass).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_note() {
        static DUPLICATE: [(Note, f64); 3] = [
            (Note::new(NoteName::La, 0), 7.25),
            (Note::new(NoteName::Si, 0), 0.0),
            (Note::new(NoteName::La, 0), -7.25),
        ];
        let table = PositionTable {
            clef: Clef::Treble,
            entries: &DUPLICATE,
        };
        match table.validate() {
            Err(SolfegeError::TableError { message, .. }) => {
                assert!(message.contains("LA"), "{}", message)
            }
            other => panic!("expected a table error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_unordered_table() {
        static BROKEN: [(Note, f64); 2] = [
            (Note::new(NoteName::Do, 0), 0.0),
            (Note::new(NoteName::Re, 0), 7.25),
        ];
        let table = PositionTable {
            clef: Clef::Treble,
            entries: &BROKEN,
        };
        assert!(matches!(
            table.validate(),
            Err(SolfegeError::TableError { .. })
        ));
    }

    #[test]
    fn test_ledger_lines_above_and_below() {
        assert!(ledger_lines(36.25).is_empty());
        assert_eq!(ledger_lines(43.5), vec![43.5]);
        assert_eq!(ledger_lines(50.75), vec![43.5]);
        assert_eq!(ledger_lines(108.75), vec![43.5, 58.0, 72.5, 87.0, 101.5]);
        assert_eq!(ledger_lines(-87.0), vec![-43.5, -58.0, -72.5, -87.0]);
    }

    #[test]
    fn test_render_note_on_ledger_line() {
        let drawing = render_staff(Clef::Treble, 43.5);
        // rows -5 through 7
        assert_eq!(drawing.lines().count(), 13);
        assert!(drawing.contains("──o──"));
        assert_eq!(drawing.matches('o').count(), 1);
    }

    #[test]
    fn test_render_note_inside_staff() {
        let drawing = render_staff(Clef::Bass, 0.0);
        assert_eq!(drawing.lines().count(), 11);
        let middle = drawing.lines().nth(5).unwrap();
        assert!(middle.starts_with(Clef::Bass.glyph()));
        assert!(middle.contains('o'));
    }
}
