//! Extraction entry point: normalize, match, score.

use std::time::Instant;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use tracing::{debug, info, warn};

use super::confidence;
use super::fields::{ExtractedFields, FieldExtractor};
use super::Result;
use crate::document::{DocumentType, PatternRegistry, REGISTRY};
use crate::error::ExtractionError;
use crate::normalize::normalize_str;

/// Result of one extraction.
///
/// Serializes flat: the field entries followed by `documentType`,
/// `extractedAt` and `confidenceScore`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Extracted fields in declaration order.
    #[serde(flatten)]
    pub fields: ExtractedFields,
    /// Document type the patterns were taken from.
    pub document_type: DocumentType,
    /// Processing time, ISO-8601 UTC with milliseconds.
    #[serde(serialize_with = "serialize_timestamp")]
    pub extracted_at: DateTime<Utc>,
    /// Percentage of fields filled; `None` when the set declares no fields.
    pub confidence_score: Option<u8>,
}

fn serialize_timestamp<S: Serializer>(
    ts: &DateTime<Utc>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Field extractor over a pattern registry.
///
/// Holds no mutable state; one instance can serve concurrent callers.
#[derive(Debug, Clone, Copy)]
pub struct Extractor<'r> {
    registry: &'r PatternRegistry,
    fallback: Option<DocumentType>,
}

impl Extractor<'static> {
    /// Extractor over the built-in registry, without fallback.
    pub fn new() -> Self {
        Self::with_registry(&REGISTRY)
    }
}

impl Default for Extractor<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> Extractor<'r> {
    /// Extractor over a caller-supplied registry.
    pub fn with_registry(registry: &'r PatternRegistry) -> Self {
        Self {
            registry,
            fallback: None,
        }
    }

    /// Document type to use for unknown identifiers.
    pub fn with_fallback(mut self, fallback: Option<DocumentType>) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn registry(&self) -> &'r PatternRegistry {
        self.registry
    }

    /// Map an identifier to a registered document type.
    pub fn resolve(&self, document_type: &str) -> Result<DocumentType> {
        let resolved = match document_type.parse::<DocumentType>() {
            Ok(t) => t,
            Err(err) => match self.fallback {
                Some(fallback) => {
                    warn!(
                        "Unknown document type {:?}, falling back to {}",
                        document_type, fallback
                    );
                    fallback
                }
                None => return Err(err),
            },
        };

        if !self.registry.contains(resolved) {
            return Err(ExtractionError::UnsupportedDocumentType(
                resolved.as_str().to_string(),
            ));
        }

        Ok(resolved)
    }

    /// Extract fields from raw OCR text for a document type identifier.
    pub fn extract(&self, document_type: &str, raw_text: &str) -> Result<ExtractionResult> {
        let resolved = self.resolve(document_type)?;
        self.extract_typed(resolved, raw_text)
    }

    /// Extract fields for an already-resolved document type.
    pub fn extract_typed(
        &self,
        document_type: DocumentType,
        raw_text: &str,
    ) -> Result<ExtractionResult> {
        self.extract_at(document_type, raw_text, Utc::now())
    }

    /// Extract fields, stamping the result with `extracted_at`.
    pub fn extract_at(
        &self,
        document_type: DocumentType,
        raw_text: &str,
        extracted_at: DateTime<Utc>,
    ) -> Result<ExtractionResult> {
        let start = Instant::now();

        let patterns = self.registry.get(document_type).ok_or_else(|| {
            ExtractionError::UnsupportedDocumentType(document_type.as_str().to_string())
        })?;

        let text = normalize_str(raw_text);
        debug!("Normalized {} bytes of OCR text to {}", raw_text.len(), text.len());

        let fields = FieldExtractor::new(patterns).extract(&text);

        let confidence_score = match confidence::score(document_type, &fields) {
            Ok(score) => Some(score),
            Err(err) => {
                warn!("{}; confidence left undefined", err);
                None
            }
        };

        info!(
            "Extracted {}/{} fields from {} in {:?}",
            fields.filled(),
            fields.len(),
            document_type,
            start.elapsed()
        );

        Ok(ExtractionResult {
            fields,
            document_type,
            extracted_at,
            confidence_score,
        })
    }
}
