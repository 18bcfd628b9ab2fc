//! Session persistence configuration.

use serde::{Deserialize, Serialize};

/// Where the session store keeps the token and decoded claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Storage backend: `"file"` or `"memory"`.
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Path of the JSON file used by the `file` backend.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            path: default_path(),
        }
    }
}

fn default_backend() -> String {
    "file".to_string()
}

fn default_path() -> String {
    "data/session.json".to_string()
}
