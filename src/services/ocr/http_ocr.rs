use super::engine::{encode_png, OcrEngine};
use crate::error::OcrError;
use crate::models::bbox::BoundingBox;
use crate::models::config::OcrConfig;
use crate::models::ocr_result::RecognizedLine;
use base64::{engine::general_purpose, Engine as _};
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP OCR client for an external recognition server
pub struct HttpOcrClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

#[derive(Serialize)]
struct ImageRequest {
    image_base64: String,
}

/// Single text box with its corner polygon
#[derive(Deserialize, Clone, Debug)]
struct TextBox {
    #[serde(rename = "box")]
    bbox: Vec<Vec<f64>>, // 4 corner points [[x1,y1], [x2,y2], [x3,y3], [x4,y4]]
    text: String,
    #[serde(default)]
    score: Option<f64>,
}

/// OCR response from the server
#[derive(Deserialize)]
struct OcrResponse {
    boxes: Vec<TextBox>,
}

impl HttpOcrClient {
    /// Create a new HTTP OCR client
    pub fn new(config: &OcrConfig) -> Result<Self, OcrError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| OcrError::Unavailable(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.http_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Check if server is healthy
    pub fn health_check(&self) -> Result<(), OcrError> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| OcrError::Request(format!("Health check failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(OcrError::Request(format!(
                "Health check returned {}",
                response.status()
            )));
        }
        Ok(())
    }

    /// Normalize server boxes into recognized lines, keeping server order
    fn lines_from_response(response: OcrResponse) -> Vec<RecognizedLine> {
        response
            .boxes
            .into_iter()
            .filter_map(|text_box| {
                let Some(bbox) = BoundingBox::from_polygon(&text_box.bbox) else {
                    warn!(text = %text_box.text, "dropping OCR box without usable corners");
                    return None;
                };
                let line = RecognizedLine::new(text_box.text, bbox);
                // Server scores are 0-1; lines carry 0-100 like Tesseract
                Some(match text_box.score {
                    Some(score) => line.with_confidence((score * 100.0) as f32),
                    None => line,
                })
            })
            .collect()
    }
}

impl OcrEngine for HttpOcrClient {
    fn name(&self) -> &'static str {
        "http"
    }

    fn recognize_lines(&self, image: &DynamicImage) -> Result<Vec<RecognizedLine>, OcrError> {
        let image_base64 = general_purpose::STANDARD.encode(encode_png(image)?);
        let url = format!("{}/ocr", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&ImageRequest { image_base64 })
            .send()
            .map_err(|e| OcrError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_else(|_| "Unknown error".to_string());
            return Err(OcrError::Request(format!("OCR server error {}: {}", status, error_text)));
        }

        let data: OcrResponse = response
            .json()
            .map_err(|e| OcrError::MalformedOutput(format!("Failed to parse response: {}", e)))?;

        let lines = Self::lines_from_response(data);
        debug!(count = lines.len(), "http OCR recognized lines");
        Ok(lines)
    }

    fn is_available(&self) -> bool {
        self.health_check().is_ok()
    }
}
