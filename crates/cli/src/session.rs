//! Session-scoped friend-name cache.
//!
//! Best-effort convenience storage, not authoritative state: read once at
//! startup, written through after every successful friend addition, and
//! offered back as quick-add suggestions while the registry is empty. Any
//! load or save failure is logged and otherwise swallowed.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SavedFriends {
    pub names: Vec<String>,
}

impl SavedFriends {
    pub fn load(path: &str) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        if let Some(parent) = Path::new(path).parent() {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(self)?;
        fs::write(path, payload)?;
        Ok(())
    }

    /// Up to `limit` cached names for quick-add display.
    pub fn suggestions(&self, limit: usize) -> &[String] {
        &self.names[..self.names.len().min(limit)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_of_missing_file_yields_default() {
        let state = SavedFriends::load("/nonexistent/sharefare_state.json").unwrap();
        assert!(state.names.is_empty());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = std::env::temp_dir().join(format!("sharefare_test_{}", std::process::id()));
        let path = dir.join("state.json");
        let path = path.to_string_lossy().to_string();

        let state = SavedFriends {
            names: vec!["Ada".to_string(), "Brin".to_string()],
        };
        state.save(&path).unwrap();
        let loaded = SavedFriends::load(&path).unwrap();
        assert_eq!(loaded.names, state.names);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn suggestions_are_capped() {
        let state = SavedFriends {
            names: (0..8).map(|i| format!("F{i}")).collect(),
        };
        assert_eq!(state.suggestions(5).len(), 5);
        assert_eq!(state.suggestions(20).len(), 8);
    }
}
