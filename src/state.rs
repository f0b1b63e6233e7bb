//! Values that survive a restart, stored as JSON in the data directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use morphclock::animation::digit::SavedDigitState;
use morphclock::widget::SavedGroupState;
use morphclock::MorphResult;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::Config;

const STATE_FILE: &str = "state.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedStopwatch {
    pub elapsed_secs: u64,
    pub digits: Vec<SavedDigitState>,
}

/// Everything persisted between runs. Missing fields load as defaults so
/// older files keep working.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    pub stopwatch: Option<SavedStopwatch>,
    pub counter: Option<SavedGroupState>,
}

/// Standard state file path: ~/.local/share/morphclock/state.json
pub fn state_path() -> PathBuf {
    Config::data_dir().join(STATE_FILE)
}

/// Read a saved session. A missing file is not an error.
pub fn load(path: &Path) -> MorphResult<Option<Session>> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No saved state at {}", path.display());
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };
    let session = serde_json::from_str(&json)?;
    info!("Restored state from {}", path.display());
    Ok(Some(session))
}

pub fn save(path: &Path, session: &Session) -> MorphResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(session)?;
    std::fs::write(path, json)?;
    info!("Saved state to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use morphclock::error::MorphError;
    use morphclock::GlyphId;
    use pretty_assertions::assert_eq;

    use super::*;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("morphclock-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn missing_file_loads_as_none() {
        assert_eq!(load(&scratch("absent.json")).unwrap(), None);
    }

    #[test]
    fn session_round_trips_through_disk() {
        let path = scratch("round-trip.json");
        let digit = |n| SavedDigitState {
            current: GlyphId::from_raw(n),
            next: GlyphId::from_raw(n),
        };
        let session = Session {
            stopwatch: Some(SavedStopwatch {
                elapsed_secs: 75,
                digits: vec![digit(0), digit(1), digit(1), digit(5)],
            }),
            counter: Some(SavedGroupState {
                number: Some(-12),
                minimum_shown: 3,
                digits: vec![digit(2), digit(1), digit(0)],
            }),
        };
        save(&path, &session).unwrap();
        assert_eq!(load(&path).unwrap(), Some(session));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn partial_file_fills_defaults() {
        let path = scratch("partial.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"counter":null}"#).unwrap();
        assert_eq!(load(&path).unwrap(), Some(Session::default()));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn corrupt_file_is_a_state_error() {
        let path = scratch("corrupt.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load(&path), Err(MorphError::State(_))));
        std::fs::remove_file(&path).ok();
    }
}
