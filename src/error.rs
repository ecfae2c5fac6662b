//! # Error Types
//!
//! Errors surfaced by the configuration loader, the sheet-music library and the
//! account layer. The drill engine itself never fails: a malformed answer is just
//! a wrong answer.
//!
//! ## Usage
//! ```rust
//! use solfege::{DrillConfig, SolfegeError};
//!
//! match DrillConfig::from_yaml("clef: alto") {
//!     Ok(config) => println!("{:?}", config),
//!     Err(SolfegeError::UnknownToken { kind, value }) => {
//!         eprintln!("unknown {}: {}", kind, value);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolfegeError {
    /// Configuration could not be read or is structurally invalid.
    ///
    /// # Example
    /// ```
    /// # use solfege::SolfegeError;
    /// let err = SolfegeError::ConfigError("feedback-delay-ms must be a number".to_string());
    /// assert_eq!(err.to_string(), "Invalid configuration: feedback-delay-ms must be a number");
    /// ```
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// A clef, difficulty or note token that does not name anything we know.
    ///
    /// # Example
    /// ```
    /// # use solfege::SolfegeError;
    /// let err = SolfegeError::UnknownToken { kind: "clef", value: "alto".to_string() };
    /// assert_eq!(err.to_string(), "Unknown clef: 'alto'");
    /// ```
    #[error("Unknown {kind}: '{value}'")]
    UnknownToken { kind: &'static str, value: String },

    /// A position table broke its ordering invariant.
    #[error("Invalid {clef} position table: {message}")]
    TableError { clef: String, message: String },

    /// Only PDF documents can be imported into the library.
    #[error("Not a PDF document: {}", .0.display())]
    UnsupportedDocument(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Sign-in or sign-out was refused by the identity provider.
    #[error("Authentication failed: {0}")]
    AuthError(String),
}

impl SolfegeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SolfegeError::Io {
            path: path.into(),
            source,
        }
    }
}
