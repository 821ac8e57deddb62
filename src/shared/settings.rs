use serde::{Deserialize, Serialize};
use ts_rs::TS;
use tokio::fs;
use std::path::{Path, PathBuf};
use directories::ProjectDirs;

use crate::shared::errors::{ConvertError, ConvertResult};

const SETTINGS_FILE: &str = "settings.json";
const STORE_FILE: &str = "convertly.redb";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
pub struct ConverterSettings {
    /// Category selected on startup
    pub default_category: String,
    /// Raw text placed in the input field on startup
    pub default_input: String,
    /// How long a notification stays visible
    pub notification_duration_ms: u64,
    /// Overrides the platform data directory for the persistent store
    #[ts(type = "string | null")]
    pub data_dir: Option<PathBuf>,
}

impl Default for ConverterSettings {
    fn default() -> Self {
        Self {
            default_category: "length".to_string(),
            default_input: "1".to_string(),
            notification_duration_ms: 2000,
            data_dir: None,
        }
    }
}

fn project_dirs() -> ConvertResult<ProjectDirs> {
    ProjectDirs::from("com", "convertly", "convertly")
        .ok_or_else(|| ConvertError::Io("Failed to determine project directories".to_string()))
}

impl ConverterSettings {
    pub fn get_settings_path() -> ConvertResult<PathBuf> {
        Ok(project_dirs()?.config_dir().join(SETTINGS_FILE))
    }

    /// Location of the redb file backing favorites, recents and theme
    pub fn store_path(&self) -> ConvertResult<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.join(STORE_FILE)),
            None => Ok(project_dirs()?.data_dir().join(STORE_FILE)),
        }
    }

    /// Load from the platform config directory, writing defaults on first run
    pub async fn load() -> ConvertResult<Self> {
        let path = Self::get_settings_path()?;
        Self::load_from(&path).await
    }

    pub async fn load_from(path: &Path) -> ConvertResult<Self> {
        if !path.exists() {
            let settings = Self::default();
            settings.save_to(path).await?;
            log::info!("[ConverterSettings] Wrote default settings to {}", path.display());
            return Ok(settings);
        }

        let content = fs::read_to_string(path).await?;
        serde_json::from_str(&content)
            .map_err(|e| ConvertError::Serialization(format!("Failed to parse settings: {}", e)))
    }

    pub async fn save(&self) -> ConvertResult<()> {
        let path = Self::get_settings_path()?;
        self.save_to(&path).await
    }

    pub async fn save_to(&self, path: &Path) -> ConvertResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let settings = ConverterSettings::load_from(&path).await.unwrap();
        assert_eq!(settings, ConverterSettings::default());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let settings = ConverterSettings {
            default_category: "temperature".to_string(),
            default_input: "100".to_string(),
            notification_duration_ms: 500,
            data_dir: Some(dir.path().to_path_buf()),
        };
        settings.save_to(&path).await.unwrap();

        let loaded = ConverterSettings::load_from(&path).await.unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.store_path().unwrap(), dir.path().join("convertly.redb"));
    }

    #[tokio::test]
    async fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        tokio::fs::write(&path, r#"{"default_category":"mass"}"#).await.unwrap();

        let loaded = ConverterSettings::load_from(&path).await.unwrap();
        assert_eq!(loaded.default_category, "mass");
        assert_eq!(loaded.notification_duration_ms, 2000);
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let err = ConverterSettings::load_from(&path).await.unwrap_err();
        assert!(matches!(err, ConvertError::Serialization(_)));
    }
}
