use crate::commands::session::SessionState;
use crate::error::{AppError, OcrError, OCR_FAILURE_MESSAGE};
use crate::models::config::SamplerConfig;
use crate::models::person::PersonRecord;
use crate::services::ocr::OcrEngine;
use crate::services::roster::aggregate;
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Status line shown while recognition runs
pub const READING_MESSAGE: &str = "جاري قراءة النص من الصورة…";

/// Status line shown after a successful extraction
pub const DONE_MESSAGE: &str = "تم استخراج الأسماء وتحديد الحالات.";

/// Clears the busy flag if an extraction is abandoned before it completes,
/// e.g. when the caller drops the future on a timeout
struct BusyGuard<'a> {
    state: &'a SessionState,
    completed: bool,
}

impl<'a> BusyGuard<'a> {
    fn new(state: &'a SessionState) -> Self {
        Self { state, completed: false }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        if self.completed {
            return;
        }
        let mut session = self.state.lock();
        session.busy = false;
        session.status_message = None;
        warn!("extraction abandoned before completion");
    }
}

/// Recognize the loaded image and rebuild the roster (async to keep the caller responsive).
///
/// The session is marked busy for the whole cycle; a second call while busy
/// fails with `AppError::Busy`. On failure the people list is emptied.
pub async fn extract_people(
    state: &SessionState,
    engine: Arc<dyn OcrEngine>,
    sampler: SamplerConfig,
) -> Result<Vec<PersonRecord>, AppError> {
    let image = {
        let mut session = state.lock();
        session.ensure_idle()?;
        let image = session.image.clone().ok_or(AppError::NoImage)?;
        session.busy = true;
        session.status_message = Some(READING_MESSAGE.to_string());
        image
    };
    let mut guard = BusyGuard::new(state);

    let engine_name = engine.name();
    let result = tokio::task::spawn_blocking(move || {
        let lines = engine.recognize_lines(&image.source)?;
        Ok::<_, OcrError>(aggregate(&lines, &image.raster, &sampler))
    })
    .await
    .map_err(|e| OcrError::Process(format!("OCR task failed: {}", e)))
    .and_then(|inner| inner);

    guard.completed = true;
    let mut session = state.lock();
    session.busy = false;

    match result {
        Ok(people) => {
            info!(engine = engine_name, people = people.len(), "extraction finished");
            session.people = people.clone();
            session.report = None;
            session.status_message = Some(DONE_MESSAGE.to_string());
            session.extracted_at = Some(Utc::now());
            Ok(people)
        }
        Err(e) => {
            error!(engine = engine_name, error = %e, "extraction failed");
            session.people.clear();
            session.report = None;
            session.extracted_at = None;
            session.status_message = Some(OCR_FAILURE_MESSAGE.to_string());
            Err(e.into())
        }
    }
}

/// Check whether the configured engine can be reached
pub async fn check_ocr_health(engine: Arc<dyn OcrEngine>) -> bool {
    tokio::task::spawn_blocking(move || engine.is_available())
        .await
        .unwrap_or(false)
}
