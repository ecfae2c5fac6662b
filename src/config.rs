//! # Drill Configuration
//!
//! Optional YAML settings for the drill and the sheet-music library. Every key
//! is optional; missing keys fall back to [`DrillConfig::default`].
//!
//! ```yaml
//! clef: bass              # treble | bass (or sol | fa)
//! difficulty: medium      # easy | medium | hard (or facile | moyen | difficile)
//! feedback-delay-ms: 300  # pause after a correct answer
//! seed: 42                # fixed shuffle order
//! library-dir: scores     # where imported PDFs are kept
//! ```

use crate::drill::FEEDBACK_DELAY;
use crate::error::SolfegeError;
use crate::note::{Clef, Difficulty};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Longest accepted feedback delay
const MAX_FEEDBACK_DELAY_MS: u64 = 5_000;

/// Raw configuration for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawConfig {
    pub clef: Option<String>,
    pub difficulty: Option<String>,
    pub feedback_delay_ms: Option<u64>,
    pub seed: Option<u64>,
    pub library_dir: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrillConfig {
    pub clef: Clef,
    pub difficulty: Difficulty,
    pub feedback_delay: Duration,
    pub seed: Option<u64>,
    pub library_dir: Option<PathBuf>,
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            clef: Clef::default(),
            difficulty: Difficulty::default(),
            feedback_delay: FEEDBACK_DELAY,
            seed: None,
            library_dir: None,
        }
    }
}

impl DrillConfig {
    pub fn from_yaml(content: &str) -> Result<Self, SolfegeError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let raw: RawConfig = serde_yaml::from_str(content)
            .map_err(|e| SolfegeError::ConfigError(e.to_string()))?;

        let clef = match &raw.clef {
            Some(s) => Clef::from_str(s).ok_or_else(|| SolfegeError::UnknownToken {
                kind: "clef",
                value: s.clone(),
            })?,
            None => Clef::default(),
        };

        let difficulty = match &raw.difficulty {
            Some(s) => Difficulty::from_str(s).ok_or_else(|| SolfegeError::UnknownToken {
                kind: "difficulty",
                value: s.clone(),
            })?,
            None => Difficulty::default(),
        };

        let feedback_delay = match raw.feedback_delay_ms {
            Some(ms) if ms > MAX_FEEDBACK_DELAY_MS => {
                return Err(SolfegeError::ConfigError(format!(
                    "feedback-delay-ms must be at most {} (got {})",
                    MAX_FEEDBACK_DELAY_MS, ms
                )));
            }
            Some(ms) => Duration::from_millis(ms),
            None => FEEDBACK_DELAY,
        };

        Ok(Self {
            clef,
            difficulty,
            feedback_delay,
            seed: raw.seed,
            library_dir: raw.library_dir.map(PathBuf::from),
        })
    }

    pub fn load(path: &Path) -> Result<Self, SolfegeError> {
        let content = fs::read_to_string(path).map_err(|e| SolfegeError::io(path, e))?;
        Self::from_yaml(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = DrillConfig::from_yaml("").unwrap();
        assert_eq!(config, DrillConfig::default());
        assert_eq!(config.clef, Clef::Treble);
        assert_eq!(config.difficulty, Difficulty::Easy);
        assert_eq!(config.feedback_delay, Duration::from_millis(300));
    }

    #[test]
    fn test_full_config() {
        let config = DrillConfig::from_yaml(
            r#"
clef: fa
difficulty: difficile
feedback-delay-ms: 150
seed: 42
library-dir: scores
"#,
        )
        .unwrap();
        assert_eq!(config.clef, Clef::Bass);
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.feedback_delay, Duration::from_millis(150));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.library_dir, Some(PathBuf::from("scores")));
    }

    #[test]
    fn test_unknown_clef() {
        let err = DrillConfig::from_yaml("clef: alto").unwrap_err();
        assert_eq!(err.to_string(), "Unknown clef: 'alto'");
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(matches!(
            DrillConfig::from_yaml("tempo: 120"),
            Err(SolfegeError::ConfigError(_))
        ));
    }

    #[test]
    fn test_delay_too_long() {
        assert!(matches!(
            DrillConfig::from_yaml("feedback-delay-ms: 60000"),
            Err(SolfegeError::ConfigError(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = DrillConfig::load(Path::new("/nonexistent/solfege.yaml")).unwrap_err();
        assert!(matches!(err, SolfegeError::Io { .. }));
    }
}
