//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::document::DocumentType;
use crate::error::IdscanError;

/// Main configuration for idscan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdscanConfig {
    /// OCR engine configuration.
    pub ocr: OcrConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// HTTP service configuration.
    pub server: ServerConfig,
}

/// OCR engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Tesseract executable name or path.
    pub binary_path: String,

    /// Recognition language code.
    pub language: String,

    /// Tesseract page segmentation mode.
    pub psm: u8,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            binary_path: "tesseract".to_string(),
            language: "eng".to_string(),
            psm: 3,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Document type used when a request names none.
    pub default_document_type: DocumentType,

    /// Document type used when a request names an unknown one.
    /// `None` rejects unknown identifiers.
    pub fallback_document_type: Option<DocumentType>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            default_document_type: DocumentType::Passport,
            fallback_document_type: None,
        }
    }
}

/// HTTP service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address.
    pub host: String,

    /// Listen port (the `PORT` environment variable takes precedence).
    pub port: u16,

    /// Maximum accepted upload size in bytes.
    pub max_upload_bytes: usize,

    /// CORS origins; empty allows any origin.
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            max_upload_bytes: 5 * 1024 * 1024,
            allowed_origins: Vec::new(),
        }
    }
}

impl IdscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, IdscanError> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| IdscanError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load from `path` if given, else from the default location if it
    /// exists, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, IdscanError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), IdscanError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| IdscanError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// `<config dir>/idscan/config.json`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("idscan").join("config.json"))
    }
}
