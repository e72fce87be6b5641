use serde::{Deserialize, Serialize};

/// Marker sampling geometry, expressed as fractions of the text line height
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SamplerConfig {
    /// Gap between the text box and the sampled square
    pub pad_fraction: f64,
    /// Side of the sampled square
    pub box_fraction: f64,
    /// Lower bound for the sampled square side, in pixels
    pub min_box: i32,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            pad_fraction: 0.3,
            box_fraction: 0.9,
            min_box: 10,
        }
    }
}

/// Largest accepted pad or square size, in line heights
const MAX_FRACTION: f64 = 4.0;

/// Largest accepted minimum square side, in pixels
const MAX_MIN_BOX: i32 = 4096;

impl SamplerConfig {
    /// Validate sampler geometry
    pub fn validate(&self) -> Result<(), String> {
        if !(self.pad_fraction.is_finite() && (0.0..=MAX_FRACTION).contains(&self.pad_fraction)) {
            return Err(format!(
                "pad_fraction must be within 0..={}, got {}",
                MAX_FRACTION, self.pad_fraction
            ));
        }

        if !(self.box_fraction.is_finite()
            && self.box_fraction > 0.0
            && self.box_fraction <= MAX_FRACTION)
        {
            return Err(format!(
                "box_fraction must be within (0, {}], got {}",
                MAX_FRACTION, self.box_fraction
            ));
        }

        if !(1..=MAX_MIN_BOX).contains(&self.min_box) {
            return Err(format!(
                "min_box must be within 1..={} pixels, got {}",
                MAX_MIN_BOX, self.min_box
            ));
        }

        Ok(())
    }
}

/// OCR backend choice
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OcrBackend {
    /// Local `tesseract` executable
    #[default]
    Tesseract,
    /// External OCR server speaking the `/ocr` JSON protocol
    Http,
}

/// OCR engine configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OcrConfig {
    pub backend: OcrBackend,
    /// Tesseract language pair: target script plus Latin
    pub languages: String,
    pub tesseract_path: String,
    /// Marker glyphs the engine should never emit
    pub char_blacklist: String,
    pub page_seg_mode: u8,
    pub http_base_url: String,
    pub http_timeout_secs: u64,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            backend: OcrBackend::Tesseract,
            languages: "ara+eng".to_string(),
            tesseract_path: "tesseract".to_string(),
            char_blacklist: "•●◦▪■□".to_string(),
            page_seg_mode: 6,
            http_base_url: "http://127.0.0.1:39835".to_string(),
            http_timeout_secs: 30,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub sampler: SamplerConfig,
    #[serde(default)]
    pub ocr: OcrConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Reject settings that would make extraction meaningless
    pub fn validate(&self) -> Result<(), String> {
        self.sampler.validate()?;

        if self.ocr.languages.trim().is_empty() {
            return Err("OCR languages must not be empty".to_string());
        }

        if self.ocr.backend == OcrBackend::Http && self.ocr.http_timeout_secs == 0 {
            return Err("HTTP OCR timeout must be greater than zero".to_string());
        }

        Ok(())
    }
}
