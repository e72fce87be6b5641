use crate::models::bbox::BoundingBox;
use serde::{Deserialize, Serialize};

/// One text line reported by an OCR engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecognizedLine {
    pub text: String,
    pub bbox: BoundingBox,
    /// Engine confidence (0-100) when the backend reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl RecognizedLine {
    pub fn new(text: impl Into<String>, bbox: BoundingBox) -> Self {
        Self {
            text: text.into(),
            bbox,
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_line_deserialize_without_confidence() {
        let json = r#"{"text":"سارة N-1","bbox":{"x0":0,"y0":0,"x1":100,"y1":20}}"#;
        let line: RecognizedLine = serde_json::from_str(json).unwrap();
        assert_eq!(line.text, "سارة N-1");
        assert_eq!(line.bbox, BoundingBox::new(0, 0, 100, 20));
        assert!(line.confidence.is_none());
    }

    #[test]
    fn test_recognized_line_with_confidence() {
        let line = RecognizedLine::new("حسين", BoundingBox::new(0, 0, 10, 10)).with_confidence(87.5);
        assert_eq!(line.confidence, Some(87.5));
    }
}
