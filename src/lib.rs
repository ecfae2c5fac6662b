pub mod auth;
pub mod config;
pub mod drill;
pub mod error;
pub mod library;
pub mod note;
pub mod pool;
pub mod staff;

pub use auth::{Account, AuthProvider, SignInMethod, UserIdentity};
pub use config::DrillConfig;
pub use drill::{DrillSession, Feedback, Phase, Snapshot, StateChange};
pub use error::*;
pub use library::{DirectoryLibrary, DocumentHandle, DocumentStore};
pub use note::{Clef, Difficulty, Note, NoteName};
pub use pool::pool;
pub use staff::{ledger_lines, render_staff, PositionTable, StaffPosition};

/// Start a drill configured by `config` and return it with its first note shown.
/// This is the main entry point for the library.
pub fn start_drill(config: &DrillConfig) -> DrillSession {
    let mut session = DrillSession::from_config(config);
    session.start_configured();
    session
}
