//! Core library for identity document OCR processing.
//!
//! This crate provides:
//! - OCR text normalization
//! - A process-wide registry of field patterns per document type
//! - Field extraction and completeness scoring
//! - The OCR provider seam (Tesseract command line behind `native`)

pub mod document;
pub mod error;
pub mod extraction;
pub mod models;
pub mod normalize;
pub mod ocr;

pub use document::{DocumentType, FieldPattern, PatternRegistry, PatternSet, REGISTRY};
pub use error::{ExtractionError, IdscanError, OcrError, RegistryError, Result};
pub use extraction::{ExtractedField, ExtractedFields, ExtractionResult, Extractor};
pub use models::config::IdscanConfig;
pub use normalize::{normalize, normalize_str};
pub use ocr::{OcrProvider, StaticText};
#[cfg(feature = "native")]
pub use ocr::TesseractCli;
