//! OCR provider seam.
//!
//! Text recognition is done by an external engine. Providers turn image
//! bytes into one raw text blob that is then handed to the extractor.

#[cfg(feature = "native")]
mod tesseract;

#[cfg(feature = "native")]
pub use tesseract::TesseractCli;

use image::ImageFormat;

use crate::error::OcrError;

/// Something that recognizes text in an image.
pub trait OcrProvider: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &str;

    /// Recognize the text of an encoded image in the given language.
    fn recognize(&self, image: &[u8], language: &str) -> Result<String, OcrError>;
}

/// Provider that returns fixed text regardless of input.
#[derive(Debug, Clone, Default)]
pub struct StaticText {
    text: String,
}

impl StaticText {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl OcrProvider for StaticText {
    fn name(&self) -> &str {
        "static"
    }

    fn recognize(&self, _image: &[u8], _language: &str) -> Result<String, OcrError> {
        Ok(self.text.clone())
    }
}

/// Detect the encoding of an image from its leading bytes.
pub fn detect_image_format(image: &[u8]) -> Result<ImageFormat, OcrError> {
    if image.is_empty() {
        return Err(OcrError::InvalidImage("empty input".to_string()));
    }
    image::guess_format(image).map_err(|e| OcrError::InvalidImage(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn test_detect_png() {
        assert_eq!(detect_image_format(PNG_HEADER).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_detect_jpeg() {
        let jpeg = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];
        assert_eq!(detect_image_format(&jpeg).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn test_reject_text() {
        assert!(matches!(
            detect_image_format(b"Name : John Smith"),
            Err(OcrError::InvalidImage(_))
        ));
        assert!(matches!(detect_image_format(b""), Err(OcrError::InvalidImage(_))));
    }

    #[test]
    fn test_static_text() {
        let provider = StaticText::new("Name : John");
        assert_eq!(provider.recognize(PNG_HEADER, "eng").unwrap(), "Name : John");
        assert_eq!(provider.name(), "static");
    }
}
