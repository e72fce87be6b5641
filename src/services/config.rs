use crate::models::config::AppConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_FILE_NAME: &str = "config.json";

/// Reads and writes the settings file. Holds no roster data.
pub struct ConfigManager {
    config_dir: PathBuf,
    config_path: PathBuf,
}

impl ConfigManager {
    /// Settings live in `<platform config dir>/roster-ocr/config.json`
    pub fn new() -> Result<Self, String> {
        let base = dirs::config_dir().ok_or("Failed to determine config directory")?;
        Self::with_dir(base.join("roster-ocr"))
    }

    /// Use an explicit directory, creating it if needed
    pub fn with_dir(config_dir: impl AsRef<Path>) -> Result<Self, String> {
        let config_dir = config_dir.as_ref().to_path_buf();
        fs::create_dir_all(&config_dir)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;

        Ok(Self {
            config_path: config_dir.join(CONFIG_FILE_NAME),
            config_dir,
        })
    }

    /// Validate and write settings. The file is replaced atomically so a
    /// crash mid-write never leaves half a config behind.
    pub fn save(&self, config: &AppConfig) -> Result<(), String> {
        config.validate()?;

        fs::create_dir_all(&self.config_dir)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;

        let json = serde_json::to_string_pretty(config)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        let staging = self.config_path.with_extension("json.tmp");
        fs::write(&staging, json).map_err(|e| format!("Failed to write config file: {}", e))?;
        fs::rename(&staging, &self.config_path)
            .map_err(|e| format!("Failed to replace config file: {}", e))?;

        debug!(path = %self.config_path.display(), "config saved");
        Ok(())
    }

    /// Read settings; a missing file means defaults
    pub fn load(&self) -> Result<AppConfig, String> {
        if !self.config_exists() {
            debug!(path = %self.config_path.display(), "no config file, using defaults");
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.config_path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let config: AppConfig = serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse config file: {}", e))?;
        config
            .validate()
            .map_err(|e| format!("Invalid config file: {}", e))?;

        Ok(config)
    }

    pub fn config_file_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn config_exists(&self) -> bool {
        self.config_path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::OcrBackend;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

    /// Manager pointing at a fresh directory that does not exist yet
    fn scratch_manager() -> ConfigManager {
        let n = NEXT_DIR.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!("roster-ocr-cfg-{}-{}", std::process::id(), n));
        let _ = fs::remove_dir_all(&dir);

        ConfigManager {
            config_path: dir.join(CONFIG_FILE_NAME),
            config_dir: dir,
        }
    }

    fn remove(manager: ConfigManager) {
        let _ = fs::remove_dir_all(&manager.config_dir);
    }

    #[test]
    fn test_with_dir_creates_directory() {
        let dir = std::env::temp_dir().join(format!("roster-ocr-with-dir-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);

        let manager = ConfigManager::with_dir(&dir).unwrap();
        assert!(dir.is_dir());
        assert!(manager.config_file_path().ends_with(CONFIG_FILE_NAME));

        remove(manager);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let manager = scratch_manager();
        assert!(!manager.config_exists());
        assert_eq!(manager.load().unwrap(), AppConfig::default());
        remove(manager);
    }

    #[test]
    fn test_save_creates_directory_and_roundtrips() {
        let manager = scratch_manager();

        let mut config = AppConfig::default();
        config.sampler.pad_fraction = 0.2;
        config.ocr.backend = OcrBackend::Http;
        config.logging.json = true;

        manager.save(&config).unwrap();
        assert!(manager.config_exists());
        assert!(!manager.config_path.with_extension("json.tmp").exists());
        assert_eq!(manager.load().unwrap(), config);

        remove(manager);
    }

    #[test]
    fn test_later_save_wins() {
        let manager = scratch_manager();

        for min_box in [8, 12] {
            let mut config = AppConfig::default();
            config.sampler.min_box = min_box;
            manager.save(&config).unwrap();
        }
        assert_eq!(manager.load().unwrap().sampler.min_box, 12);

        remove(manager);
    }

    #[test]
    fn test_invalid_settings_are_not_saved() {
        let manager = scratch_manager();

        let mut config = AppConfig::default();
        config.sampler.min_box = 0;
        assert!(manager.save(&config).is_err());
        assert!(!manager.config_exists());

        remove(manager);
    }

    #[test]
    fn test_load_rejects_bad_files() {
        let manager = scratch_manager();
        fs::create_dir_all(&manager.config_dir).unwrap();

        fs::write(&manager.config_path, "{ not json").unwrap();
        assert!(manager.load().unwrap_err().starts_with("Failed to parse config file"));

        fs::write(&manager.config_path, r#"{ "sampler": { "box_fraction": -1.0 } }"#).unwrap();
        assert!(manager.load().unwrap_err().starts_with("Invalid config file"));

        remove(manager);
    }
}
