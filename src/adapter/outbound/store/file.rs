//! Durable JSON-file timestamp store.
//!
//! The whole map is rewritten on every `set` (temp file, then rename), so a
//! returned `Ok` means the value survives a restart.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::port::outbound::store::TimestampStore;

/// Timestamp map persisted as a flat JSON object.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, i64>>,
}

impl JsonFileStore {
    /// Open the store at `path`, loading any existing entries.
    ///
    /// A missing file starts empty. An unreadable or corrupt file also
    /// starts empty, with a warning; the next `set` overwrites it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load(&path);
        debug!(path = %path.display(), entries = entries.len(), "Opened rate-limit store");
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &HashMap<String, i64>) -> Result<()> {
        let json = serde_json::to_string_pretty(entries)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.path.with_extension("tmp");
        let cleanup_and_err = |e: std::io::Error| {
            let _ = fs::remove_file(&temp_path);
            Error::Store(format!("{}: {e}", self.path.display()))
        };

        let mut file = fs::File::create(&temp_path).map_err(cleanup_and_err)?;
        file.write_all(json.as_bytes()).map_err(cleanup_and_err)?;
        file.sync_all().map_err(cleanup_and_err)?;
        fs::rename(&temp_path, &self.path).map_err(cleanup_and_err)?;
        Ok(())
    }
}

fn load(path: &Path) -> HashMap<String, i64> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Cannot read rate-limit store, starting empty");
            return HashMap::new();
        }
    };
    serde_json::from_str(&content).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "Corrupt rate-limit store, starting empty");
        HashMap::new()
    })
}

impl TimestampStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<i64> {
        self.entries.lock().get(key).copied()
    }

    fn set(&self, key: &str, ts: i64) -> Result<()> {
        // Lock held across the write so concurrent sets land in order.
        let mut entries = self.entries.lock();
        entries.insert(key.to_string(), ts);
        self.persist(&entries)
    }
}
