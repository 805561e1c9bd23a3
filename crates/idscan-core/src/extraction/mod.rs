//! Identity document field extraction.

pub mod confidence;
mod extractor;
mod fields;

pub use extractor::{ExtractionResult, Extractor};
pub use fields::{ExtractedField, ExtractedFields, FieldExtractor};

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
