use crate::error::AppError;
use crate::models::person::{PersonRecord, StatusTag};
use base64::Engine as _;
use chrono::{DateTime, Utc};
use image::{DynamicImage, RgbaImage};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// A decoded screenshot: the original for OCR and an RGBA raster for sampling
pub struct LoadedImage {
    pub source: DynamicImage,
    pub raster: RgbaImage,
}

impl LoadedImage {
    pub fn new(source: DynamicImage) -> Self {
        let raster = source.to_rgba8();
        Self { source, raster }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.raster.dimensions()
    }
}

/// State of one analysis cycle. Replaced wholesale on a new image or reset.
#[derive(Default)]
pub struct Session {
    pub(crate) image: Option<Arc<LoadedImage>>,
    pub(crate) people: Vec<PersonRecord>,
    pub(crate) busy: bool,
    pub(crate) status_message: Option<String>,
    pub(crate) report: Option<String>,
    pub(crate) extracted_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Reject operations while an extraction is in flight
    pub(crate) fn ensure_idle(&self) -> Result<(), AppError> {
        if self.busy {
            return Err(AppError::Busy);
        }
        Ok(())
    }

    fn clear_results(&mut self) {
        self.people.clear();
        self.status_message = None;
        self.report = None;
        self.extracted_at = None;
    }
}

/// Read-only view of the session for a UI
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SessionSnapshot {
    pub image_size: Option<(u32, u32)>,
    pub people: Vec<PersonRecord>,
    pub busy: bool,
    pub status_message: Option<String>,
    pub report: Option<String>,
    pub extracted_at: Option<DateTime<Utc>>,
}

/// Manual correction of one extracted person; `None` fields are left as-is
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonEdit {
    pub name: Option<String>,
    pub code: Option<String>,
    pub status: Option<StatusTag>,
}

/// State wrapper for the session (Arc for async sharing, parking_lot::Mutex for performance)
pub type SessionState = Arc<Mutex<Session>>;

/// Initialize an empty session
pub fn init_session() -> SessionState {
    Arc::new(Mutex::new(Session::default()))
}

fn install_image(state: &SessionState, image: DynamicImage) -> Result<(u32, u32), AppError> {
    let loaded = LoadedImage::new(image);
    let size = loaded.dimensions();

    let mut session = state.lock();
    session.ensure_idle()?;
    session.clear_results();
    session.image = Some(Arc::new(loaded));

    info!(width = size.0, height = size.1, "image loaded");
    Ok(size)
}

/// Load an encoded image (file upload, clipboard paste or drag-and-drop payload)
pub fn load_image_bytes(state: &SessionState, bytes: &[u8]) -> Result<(u32, u32), AppError> {
    state.lock().ensure_idle()?;
    let image = image::load_from_memory(bytes)?;
    install_image(state, image)
}

/// Load an image from a base64 string, with or without a `data:` URL prefix
pub fn load_image_base64(state: &SessionState, data: &str) -> Result<(u32, u32), AppError> {
    let payload = match data.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => data,
    };

    let bytes = base64::engine::general_purpose::STANDARD.decode(payload.trim())?;
    load_image_bytes(state, &bytes)
}

/// Load an image from disk
pub fn load_image_file(state: &SessionState, path: impl AsRef<Path>) -> Result<(u32, u32), AppError> {
    state.lock().ensure_idle()?;
    let image = image::open(path.as_ref())?;
    install_image(state, image)
}

/// Clear the image, the extracted list, the report and the status line
pub fn reset_session(state: &SessionState) -> Result<(), AppError> {
    let mut session = state.lock();
    session.ensure_idle()?;
    session.clear_results();
    session.image = None;
    info!("session reset");
    Ok(())
}

/// Apply an operator correction to the person at `index`
pub fn update_person(state: &SessionState, index: usize, edit: PersonEdit) -> Result<PersonRecord, AppError> {
    let mut session = state.lock();
    session.ensure_idle()?;

    let person = session
        .people
        .get_mut(index)
        .ok_or(AppError::InvalidIndex(index))?;

    if let Some(name) = edit.name {
        person.name = name;
    }
    if let Some(code) = edit.code {
        person.code = code;
    }
    if let Some(status) = edit.status {
        person.status = status;
    }

    Ok(person.clone())
}

/// Current session contents
pub fn snapshot(state: &SessionState) -> SessionSnapshot {
    let session = state.lock();
    SessionSnapshot {
        image_size: session.image.as_ref().map(|image| image.dimensions()),
        people: session.people.clone(),
        busy: session.busy,
        status_message: session.status_message.clone(),
        report: session.report.clone(),
        extracted_at: session.extracted_at,
    }
}
