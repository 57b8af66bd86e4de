//! Shell settings, persisted to `settings.json` in the app config dir.
//!
//! Load is lenient (missing or corrupt file yields defaults — the shell must
//! come up regardless); save is an atomic temp-file-then-rename write.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::ShellResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellSettings {
    pub notifications_enabled: bool,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            notifications_enabled: true,
        }
    }
}

struct Inner {
    settings: ShellSettings,
    path: PathBuf,
}

/// Cheaply cloneable process-wide settings handle. Read by the bridge
/// router, written from the tray menu.
#[derive(Clone)]
pub struct SettingsState(Arc<RwLock<Inner>>);

impl SettingsState {
    pub fn load(config_dir: &Path) -> Self {
        let path = config_dir.join("settings.json");
        let settings = std::fs::read_to_string(&path)
            .ok()
            .and_then(|data| serde_json::from_str(&data).ok())
            .unwrap_or_default();
        Self(Arc::new(RwLock::new(Inner { settings, path })))
    }

    pub fn notifications_enabled(&self) -> bool {
        self.0
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .settings
            .notifications_enabled
    }

    /// Flip the mute state and persist. A failed write keeps the in-memory
    /// value and is only logged.
    pub fn set_notifications_enabled(&self, enabled: bool) {
        let mut inner = self.0.write().unwrap_or_else(|e| e.into_inner());
        inner.settings.notifications_enabled = enabled;
        if let Err(e) = save(&inner.path, &inner.settings) {
            log::warn!("[settings] failed to persist settings: {e}");
        }
    }
}

/// Atomic write: temp sibling file, then rename into place. Rename is atomic
/// on POSIX when src and dst share a filesystem (guaranteed here — sibling).
fn save(path: &Path, settings: &ShellSettings) -> ShellResult<()> {
    let data = serde_json::to_string_pretty(settings)?;
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, data.as_bytes())?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let state = SettingsState::load(dir.path());
        assert!(state.notifications_enabled());
    }

    #[test]
    fn corrupt_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), "{not json").unwrap();
        let state = SettingsState::load(dir.path());
        assert!(state.notifications_enabled());
    }

    #[test]
    fn mute_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let state = SettingsState::load(dir.path());
        state.set_notifications_enabled(false);

        let reloaded = SettingsState::load(dir.path());
        assert!(!reloaded.notifications_enabled());

        // Temp file should not linger
        assert!(!dir.path().join("settings.tmp").exists());
    }
}
