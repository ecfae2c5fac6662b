//! # Note Identity Types
//!
//! Structured note identities for the drill, plus the clef and difficulty
//! selectors.
//!
//! ## Type Hierarchy
//! ```text
//! Note
//!   ├── name: NoteName (DO RÉ MI FA SOL LA SI)
//!   └── ledger_tier: i8 (0 = core octave of the staff)
//!
//! Clef       treble | bass
//! Difficulty easy | medium | hard
//! ```
//!
//! ### Ledger Tiers
//! - Tier 0 is the octave drawn on the staff proper
//! - Negative tiers go down (`_G`, `_G2`, `_G3`), positive tiers go up (`_A`, `_A2`)
//! - Tiers with magnitude 2 or more are the outer ledger registers, excluded
//!   from medium drills
//! - Tiers are named after the staff's ledger regions, not octaves: a register
//!   does not always begin at DO (bass `SI_G2` sits below `DO_G2`). Pitch order
//!   is therefore the order of a clef's position table, not `(tier, name)`.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Solfège note names, in scale order starting from DO
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum NoteName {
    #[serde(rename = "DO")]
    Do,
    #[serde(rename = "RÉ")]
    Re,
    #[serde(rename = "MI")]
    Mi,
    #[serde(rename = "FA")]
    Fa,
    #[serde(rename = "SOL")]
    Sol,
    #[serde(rename = "LA")]
    La,
    #[serde(rename = "SI")]
    Si,
}

impl NoteName {
    /// All seven names in scale order (the answer buttons of the drill)
    pub const ALL: [NoteName; 7] = [
        NoteName::Do,
        NoteName::Re,
        NoteName::Mi,
        NoteName::Fa,
        NoteName::Sol,
        NoteName::La,
        NoteName::Si,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            NoteName::Do => "DO",
            NoteName::Re => "RÉ",
            NoteName::Mi => "MI",
            NoteName::Fa => "FA",
            NoteName::Sol => "SOL",
            NoteName::La => "LA",
            NoteName::Si => "SI",
        }
    }

    /// Position within the octave (DO = 0, SI = 6)
    pub fn index(&self) -> i32 {
        *self as i32
    }

    /// Parse an answer label. Only the exact labels match.
    pub fn from_label(s: &str) -> Option<Self> {
        match s {
            "DO" => Some(NoteName::Do),
            "RÉ" => Some(NoteName::Re),
            "MI" => Some(NoteName::Mi),
            "FA" => Some(NoteName::Fa),
            "SOL" => Some(NoteName::Sol),
            "LA" => Some(NoteName::La),
            "SI" => Some(NoteName::Si),
            _ => None,
        }
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A note on the staff: a name plus the ledger register it sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Note {
    pub name: NoteName,
    pub ledger_tier: i8,
}

impl Note {
    pub const fn new(name: NoteName, ledger_tier: i8) -> Self {
        Self { name, ledger_tier }
    }

    /// True for notes in the second (or further) ledger register
    pub fn is_outer_ledger(&self) -> bool {
        self.ledger_tier.abs() >= 2
    }
}

/// Token form: `DO`, `SOL_G`, `RÉ_G2`, `DO_A`, `FA_A2`
impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.label())?;
        let depth = self.ledger_tier.unsigned_abs();
        match self.ledger_tier.cmp(&0) {
            Ordering::Equal => Ok(()),
            Ordering::Less if depth == 1 => f.write_str("_G"),
            Ordering::Less => write!(f, "_G{}", depth),
            Ordering::Greater if depth == 1 => f.write_str("_A"),
            Ordering::Greater => write!(f, "_A{}", depth),
        }
    }
}

/// Staff clef
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Clef {
    #[default]
    Treble,
    Bass,
}

impl Clef {
    /// Parse from string (case-insensitive). `sol` and `fa` are accepted as the
    /// French names of the treble and bass clefs.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "treble" | "sol" | "g" => Some(Clef::Treble),
            "bass" | "fa" | "f" => Some(Clef::Bass),
            _ => None,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Clef::Treble => "𝄞",
            Clef::Bass => "𝄢",
        }
    }
}

impl fmt::Display for Clef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clef::Treble => f.write_str("treble"),
            Clef::Bass => f.write_str("bass"),
        }
    }
}

/// Drill difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Parse from string (case-insensitive), English or French names.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "facile" => Some(Difficulty::Easy),
            "medium" | "moyen" => Some(Difficulty::Medium),
            "hard" | "difficile" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => f.write_str("easy"),
            Difficulty::Medium => f.write_str("medium"),
            Difficulty::Hard => f.write_str("hard"),
        }
    }
}
