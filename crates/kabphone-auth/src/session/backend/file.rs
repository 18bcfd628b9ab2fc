//! Session storage persisted as a JSON object on disk.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use kabphone_core::error::{AppError, ErrorKind};
use kabphone_core::result::AppResult;
use kabphone_core::traits::SessionStorage;

/// Session storage backed by a single JSON file.
///
/// The whole map is rewritten through a temporary sibling file and renamed
/// into place, so a batch from [`SessionStorage::set_many`] lands on disk
/// all at once or not at all.
#[derive(Debug)]
pub struct FileSessionStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileSessionStorage {
    /// Open (or lazily create) the store at `path`.
    ///
    /// A file that cannot be parsed is treated as empty and overwritten on
    /// the next write.
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(map) => map,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Ignoring unreadable session file");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read session file: {}", path.display()),
                    e,
                ));
            }
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create session directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        let data = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &data)
            .and_then(|()| fs::rename(&tmp, &self.path))
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to write session file: {}", self.path.display()),
                    e,
                )
            })?;

        debug!(path = %self.path.display(), entries = entries.len(), "Persisted session file");
        Ok(())
    }

    /// Apply `change` to a copy of the map, persist it, then commit it in
    /// memory. A failed write leaves both the file and the map untouched.
    fn update(&self, change: impl FnOnce(&mut BTreeMap<String, String>)) -> AppResult<()> {
        let mut guard = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let mut next = guard.clone();
        change(&mut next);
        self.persist(&next)?;
        *guard = next;
        Ok(())
    }
}

impl SessionStorage for FileSessionStorage {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> AppResult<()> {
        self.update(|map| {
            for (key, value) in entries {
                map.insert((*key).to_string(), (*value).to_string());
            }
        })
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.update(|map| {
            map.remove(key);
        })
    }

    fn clear(&self) -> AppResult<()> {
        self.update(BTreeMap::clear)
    }
}
