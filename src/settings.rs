use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::PathBuf,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::models::DetectorOptions;

const FPS_ENV_VAR: &str = "SCANFRAME_FPS";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanLineSettings {
    /// Distance the line travels down the scan area, in layout units.
    pub travel: f32,
    pub duration_ms: u64,
    pub thickness: f32,
    /// Run back up after reaching the bottom instead of jumping to the top.
    pub reverse: bool,
}

impl Default for ScanLineSettings {
    fn default() -> Self {
        Self {
            travel: 270.0,
            duration_ms: 2000,
            thickness: 6.0,
            reverse: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ScannerSettings {
    /// Upper bound on frames handed to the detector per second.
    pub frame_rate_cap: u32,
    pub detector: DetectorOptions,
    /// Side length of the square scan area.
    pub scan_area_size: f32,
    pub scan_line: ScanLineSettings,
    pub overlay_fps: u32,
}

impl Default for ScannerSettings {
    fn default() -> Self {
        Self {
            frame_rate_cap: 5,
            detector: DetectorOptions::default(),
            scan_area_size: 280.0,
            scan_line: ScanLineSettings::default(),
            overlay_fps: 60,
        }
    }
}

impl ScannerSettings {
    /// Applies `SCANFRAME_FPS` on top of the stored cap; zero or garbage is ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(fps) = std::env::var(FPS_ENV_VAR)
            .ok()
            .and_then(|value| value.trim().parse::<u32>().ok())
            .filter(|fps| *fps > 0)
        {
            self.frame_rate_cap = fps;
        }
        self
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<ScannerSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log::warn!(
                    "Ignoring unreadable settings at {}: {err}; using defaults",
                    path.display()
                );
                ScannerSettings::default()
            })
        } else {
            ScannerSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn scanner(&self) -> ScannerSettings {
        self.read().clone()
    }

    pub fn update(&self, settings: ScannerSettings) -> Result<()> {
        let mut guard = self.write();
        *guard = settings;
        self.persist(&guard)
    }

    pub fn reload(&self) -> Result<()> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {}", self.path.display()))?;
        let data: ScannerSettings = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid settings in {}", self.path.display()))?;
        *self.write() = data;
        Ok(())
    }

    fn persist(&self, data: &ScannerSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }

    fn read(&self) -> RwLockReadGuard<'_, ScannerSettings> {
        match self.data.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, ScannerSettings> {
        match self.data.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json")).unwrap();
        let settings = store.scanner();
        assert_eq!(settings.frame_rate_cap, 5);
        assert_eq!(settings.scan_area_size, 280.0);
        assert!(settings.detector.check_inverted);
    }

    #[test]
    fn update_persists_and_reload_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let store = SettingsStore::new(path.clone()).unwrap();

        let mut settings = store.scanner();
        settings.frame_rate_cap = 10;
        settings.scan_line.reverse = false;
        store.update(settings.clone()).unwrap();

        let reopened = SettingsStore::new(path).unwrap();
        assert_eq!(reopened.scanner(), settings);

        reopened.reload().unwrap();
        assert_eq!(reopened.scanner().frame_rate_cap, 10);
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let store = SettingsStore::new(path).unwrap();
        assert_eq!(store.scanner(), ScannerSettings::default());
        assert!(store.reload().is_err());
    }

    #[test]
    fn partial_file_fills_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "frameRateCap": 2 }"#).unwrap();

        let store = SettingsStore::new(path).unwrap();
        let settings = store.scanner();
        assert_eq!(settings.frame_rate_cap, 2);
        assert_eq!(settings.overlay_fps, 60);
    }
}
