use crate::error::OcrError;
use crate::models::ocr_result::RecognizedLine;
use image::DynamicImage;

/// OCR Engine trait - abstraction over the external text recognizer
pub trait OcrEngine: Send + Sync {
    /// Short backend name for logs
    fn name(&self) -> &'static str;

    /// Recognize text lines with their bounding boxes in source-image pixels.
    ///
    /// An image without text yields an empty list, not an error.
    fn recognize_lines(&self, image: &DynamicImage) -> Result<Vec<RecognizedLine>, OcrError>;

    /// Check if the engine can be reached
    fn is_available(&self) -> bool;
}

/// Encode an image as PNG bytes for engines that take an encoded file
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, OcrError> {
    let mut buffer = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut buffer), image::ImageFormat::Png)
        .map_err(|e| OcrError::Encode(e.to_string()))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_encode_png_roundtrips_dimensions() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(7, 3, Rgba([10, 20, 30, 255])));
        let bytes = encode_png(&image).unwrap();

        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (7, 3));
    }
}
