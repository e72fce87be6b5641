use thiserror::Error;

/// Operator-facing message for any failed recognition cycle
pub const OCR_FAILURE_MESSAGE: &str =
    "حدث خطأ أثناء القراءة. جرّب صورة أوضح أو قصّ الجزء المطلوب.";

/// Failures at the OCR engine boundary
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR engine unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("OCR process failed: {0}")]
    Process(String),

    #[error("OCR request failed: {0}")]
    Request(String),

    #[error("Malformed OCR output: {0}")]
    MalformedOutput(String),
}

/// Report assembly failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("recipient or deputy name is required")]
    MissingRecipient,
}

/// Errors surfaced by session operations
#[derive(Debug, Error)]
pub enum AppError {
    #[error("an extraction is already running")]
    Busy,

    #[error("no image loaded")]
    NoImage,

    #[error("Failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("Failed to decode base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("no person at index {0}")]
    InvalidIndex(usize),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Message suitable for showing to the operator
    pub fn user_message(&self) -> String {
        match self {
            AppError::Busy => "جاري الاستخراج…".to_string(),
            AppError::NoImage => "أضف صورة أولاً (رفع ملف أو لصق بالكيبورد)".to_string(),
            AppError::ImageDecode(_) | AppError::Base64(_) | AppError::Ocr(_) => OCR_FAILURE_MESSAGE.to_string(),
            AppError::Report(ReportError::MissingRecipient) => {
                "الرجاء منك كتابة المستلم أو النائب".to_string()
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ocr_failure_maps_to_retry_message() {
        let err = AppError::from(OcrError::Process("exit status 1".to_string()));
        assert_eq!(err.user_message(), OCR_FAILURE_MESSAGE);
        assert!(err.to_string().contains("exit status 1"));
    }

    #[test]
    fn test_report_error_message() {
        let err = AppError::from(ReportError::MissingRecipient);
        assert_eq!(err.user_message(), "الرجاء منك كتابة المستلم أو النائب");
    }

    #[test]
    fn test_invalid_index_message() {
        assert_eq!(AppError::InvalidIndex(4).user_message(), "no person at index 4");
    }
}
