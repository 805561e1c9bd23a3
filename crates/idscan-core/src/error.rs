//! Error types for the idscan-core library.

use thiserror::Error;

use crate::document::DocumentType;

/// Main error type for the idscan library.
#[derive(Error, Debug)]
pub enum IdscanError {
    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Pattern registry construction error.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to field extraction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The requested document type is not registered and no fallback applies.
    #[error("unsupported document type: {0}")]
    UnsupportedDocumentType(String),

    /// The resolved pattern set has no fields, so confidence is undefined.
    #[error("document type {0} has no field patterns")]
    EmptyPatternSet(DocumentType),
}

/// Errors raised while building a pattern registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A pattern failed to compile.
    #[error("invalid pattern for {document_type}.{field}: {reason}")]
    InvalidPattern {
        document_type: DocumentType,
        field: String,
        reason: String,
    },

    /// A pattern lacks the named capture group for its field.
    #[error("pattern for {document_type}.{field} has no capture group named {field}")]
    MissingCaptureGroup {
        document_type: DocumentType,
        field: String,
    },

    /// A field name collides with a result metadata key.
    #[error("field name {field} in {document_type} pattern set is reserved")]
    ReservedField {
        document_type: DocumentType,
        field: String,
    },

    /// Two patterns in one set share a field name.
    #[error("duplicate field {field} in {document_type} pattern set")]
    DuplicateField {
        document_type: DocumentType,
        field: String,
    },
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The OCR engine could not be started.
    #[error("OCR engine unavailable: {0}")]
    Unavailable(String),

    /// The OCR engine ran but reported failure.
    #[error("OCR engine failed: {0}")]
    Engine(String),

    /// The input is not a recognizable image.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// The engine produced output that is not valid text.
    #[error("invalid OCR output: {0}")]
    InvalidOutput(String),

    /// I/O error while talking to the engine.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the idscan library.
pub type Result<T> = std::result::Result<T, IdscanError>;
