//! Artifact persistence — atomic JSON save and load.
//!
//! A fitted preprocessor is written once per training run and read back at
//! inference time, possibly by a different process. Writes go to a `.tmp`
//! sibling first and are renamed into place, so a crash mid-write never
//! leaves a truncated artifact at the published path.

use std::io;
use std::path::Path;

/// Atomically serialize `data` as pretty-printed JSON at `path`.
///
/// Creates parent directories if they don't exist. An existing artifact at
/// the same path is overwritten.
pub fn atomic_write_json<T: serde::Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(data).map_err(io::Error::other)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, json.as_bytes())?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// Load and deserialize a JSON artifact from `path`.
///
/// Returns `Ok(None)` if no file exists at `path`; the caller decides whether
/// a missing artifact is an error.
pub fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> io::Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let data = std::fs::read_to_string(path)?;
    let value =
        serde_json::from_str(&data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(Some(value))
}
