pub mod engine;
pub mod http_ocr;
pub mod parser;
pub mod tesseract;

use crate::error::OcrError;
use crate::models::config::{OcrBackend, OcrConfig};
use std::sync::Arc;

// Re-export main types
pub use engine::OcrEngine;
pub use http_ocr::HttpOcrClient;
pub use parser::{contains_target_script, parse_name_code, ParsedName};
pub use tesseract::TesseractEngine;

/// Build the configured OCR backend
pub fn build_engine(config: &OcrConfig) -> Result<Arc<dyn OcrEngine>, OcrError> {
    let engine: Arc<dyn OcrEngine> = match config.backend {
        OcrBackend::Tesseract => Arc::new(TesseractEngine::new(config)),
        OcrBackend::Http => Arc::new(HttpOcrClient::new(config)?),
    };
    tracing::info!(backend = engine.name(), languages = %config.languages, "OCR engine ready");
    Ok(engine)
}
