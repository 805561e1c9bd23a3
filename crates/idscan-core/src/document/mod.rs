//! Supported identity document types and their field patterns.

mod patterns;
mod registry;

pub use patterns::REGISTRY;
pub use registry::{FieldMatch, FieldPattern, PatternRegistry, PatternRegistryBuilder, PatternSet};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// Type of identity document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentType {
    /// Driving license.
    DrivingLicense,
    /// Passport (data page).
    Passport,
}

impl DocumentType {
    /// Every supported document type, in display order.
    pub const ALL: [DocumentType; 2] = [Self::DrivingLicense, Self::Passport];

    /// Wire identifier used in requests and results.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DrivingLicense => "drivingLicense",
            Self::Passport => "passport",
        }
    }

    /// Human-readable name.
    pub fn description(&self) -> &'static str {
        match self {
            Self::DrivingLicense => "Driving license",
            Self::Passport => "Passport",
        }
    }
}

impl Default for DocumentType {
    fn default() -> Self {
        Self::Passport
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = ExtractionError;

    /// Accepts exactly the wire identifiers, like the serde representation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ExtractionError::UnsupportedDocumentType(s.to_string()))
    }
}
