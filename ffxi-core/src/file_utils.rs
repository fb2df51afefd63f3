//! JSON file helpers shared by every subcommand.
//!
//! Inputs are read whole and parsed in one pass; outputs are serialized
//! whole before anything is written, so a failed run never leaves a
//! partially written file behind a successful exit.

use crate::error::{FfxiError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Read a JSON file containing an array of records.
pub fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let text = std::fs::read_to_string(path).map_err(|source| FfxiError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| FfxiError::ParseInput {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a value as 2-space-indented JSON.
pub fn write_pretty_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).map_err(|source| FfxiError::WriteOutput {
        path: path.to_path_buf(),
        source,
    })
}

/// Write plain text.
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text).map_err(|source| FfxiError::WriteOutput {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CrystalEntry;

    #[test]
    fn test_read_json_array_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crystals.json");

        let entries = vec![
            CrystalEntry { crystal: "Wind Crystal".to_string() },
            CrystalEntry { crystal: "Fire Crystal".to_string() },
        ];
        write_pretty_json(&path, &entries).unwrap();

        let loaded: Vec<CrystalEntry> = read_json_array(&path).unwrap();
        assert_eq!(loaded, entries);

        // Output is 2-space indented.
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("  \"Crystal\""));
    }

    #[test]
    fn test_read_json_array_malformed_input_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "not json at all").unwrap();

        let err = read_json_array::<CrystalEntry>(&path).unwrap_err();
        assert!(matches!(err, FfxiError::ParseInput { .. }));
    }

    #[test]
    fn test_read_json_array_missing_file_is_read_error() {
        let err = read_json_array::<CrystalEntry>(Path::new("/nonexistent/input.json"))
            .unwrap_err();
        assert!(matches!(err, FfxiError::ReadInput { .. }));
    }
}
