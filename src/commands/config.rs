use crate::error::AppError;
use crate::models::config::AppConfig;
use crate::services::config::ConfigManager;
use std::sync::Mutex;

/// State wrapper for configuration manager
pub type ConfigManagerState = Mutex<ConfigManager>;

/// Initialize config manager state
pub fn init_config_manager() -> Result<ConfigManagerState, AppError> {
    let manager = ConfigManager::new().map_err(AppError::Config)?;
    Ok(Mutex::new(manager))
}

/// Save entire application configuration
pub fn save_config(state: &ConfigManagerState, config: &AppConfig) -> Result<(), AppError> {
    let manager = state
        .lock()
        .map_err(|e| AppError::Config(format!("Failed to lock config manager: {}", e)))?;

    manager.save(config).map_err(AppError::Config)
}

/// Load entire application configuration
pub fn load_config(state: &ConfigManagerState) -> Result<AppConfig, AppError> {
    let manager = state
        .lock()
        .map_err(|e| AppError::Config(format!("Failed to lock config manager: {}", e)))?;

    manager.load().map_err(AppError::Config)
}

/// Get config file path
pub fn get_config_path(state: &ConfigManagerState) -> Result<String, AppError> {
    let manager = state
        .lock()
        .map_err(|e| AppError::Config(format!("Failed to lock config manager: {}", e)))?;

    Ok(manager
        .config_file_path()
        .to_str()
        .unwrap_or("")
        .to_string())
}
