//! Completeness scoring for extracted fields.

use super::{ExtractedFields, Result};
use crate::document::DocumentType;
use crate::error::ExtractionError;

/// Percentage of declared fields that were extracted, rounded half up.
///
/// Every field weighs the same. A set with no fields has no defined score
/// and yields [`ExtractionError::EmptyPatternSet`].
pub fn score(document_type: DocumentType, fields: &ExtractedFields) -> Result<u8> {
    let total = fields.len();
    if total == 0 {
        return Err(ExtractionError::EmptyPatternSet(document_type));
    }

    let filled = fields.filled();
    let percent = (200 * filled + total) / (2 * total);

    Ok(percent as u8)
}
