pub mod commands;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use commands::config::{init_config_manager, load_config, ConfigManagerState};
use commands::session::{init_session, SessionState};
use models::config::AppConfig;
use models::person::PersonRecord;
use services::config::ConfigManager;
use services::ocr::{build_engine, OcrEngine};
use std::sync::{Arc, Mutex};

pub use error::{AppError, OcrError, ReportError};

/// Everything a front end needs to drive the roster workflow
pub struct AppContext {
    pub config_manager: ConfigManagerState,
    pub config: AppConfig,
    pub engine: Arc<dyn OcrEngine>,
    pub session: SessionState,
}

impl AppContext {
    /// Run one extraction on the loaded image with the configured sampler
    pub async fn extract_people(&self) -> Result<Vec<PersonRecord>, AppError> {
        commands::ocr::extract_people(&self.session, self.engine.clone(), self.config.sampler.clone()).await
    }
}

/// Load settings from the platform config directory and wire up the app.
///
/// Call this before entering the async runtime: the HTTP backend builds a
/// blocking client, which must not be created on a runtime thread.
pub fn bootstrap() -> Result<AppContext, AppError> {
    let config_manager = init_config_manager()?;
    bootstrap_with(config_manager)
}

/// Same as [`bootstrap`] with a caller-provided config manager
pub fn bootstrap_with(config_manager: ConfigManagerState) -> Result<AppContext, AppError> {
    let config = load_config(&config_manager)?;

    utils::logging::init_logging(&config.logging).map_err(AppError::Config)?;

    let engine = build_engine(&config.ocr)?;
    let session = init_session();

    tracing::info!(
        backend = engine.name(),
        config_path = ?config_manager.lock().ok().map(|m| m.config_file_path().clone()),
        "roster-ocr ready"
    );

    Ok(AppContext {
        config_manager,
        config,
        engine,
        session,
    })
}

/// Build a config manager rooted at an explicit directory
pub fn config_manager_at(dir: impl AsRef<std::path::Path>) -> Result<ConfigManagerState, AppError> {
    let manager = ConfigManager::with_dir(dir).map_err(AppError::Config)?;
    Ok(Mutex::new(manager))
}
