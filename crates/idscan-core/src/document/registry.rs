//! Pattern registry keyed by document type.

use std::collections::HashMap;

use regex::{Regex, RegexBuilder};
use tracing::debug;

use super::DocumentType;
use crate::error::RegistryError;
use crate::normalize::normalize_str;

/// Keys the extraction result reserves for its own metadata.
pub const RESERVED_FIELDS: [&str; 3] = ["documentType", "extractedAt", "confidenceScore"];

/// A single match produced by a [`FieldPattern`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    /// Normalized captured value.
    pub value: String,
    /// Captured text before normalization.
    pub source: String,
    /// Byte range of the capture in the searched text.
    pub position: (usize, usize),
}

/// A named, compiled pattern for one field.
#[derive(Debug, Clone)]
pub struct FieldPattern {
    field: String,
    regex: Regex,
}

impl FieldPattern {
    /// Compile a pattern for `field`.
    ///
    /// The pattern is case-insensitive and must contain a capture group named
    /// after the field.
    pub fn new(
        document_type: DocumentType,
        field: &str,
        pattern: &str,
    ) -> Result<Self, RegistryError> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| RegistryError::InvalidPattern {
                document_type,
                field: field.to_string(),
                reason: e.to_string(),
            })?;

        if !regex.capture_names().flatten().any(|name| name == field) {
            return Err(RegistryError::MissingCaptureGroup {
                document_type,
                field: field.to_string(),
            });
        }

        Ok(Self {
            field: field.to_string(),
            regex,
        })
    }

    /// Field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Pattern source.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// First match of the field's capture group in `text`.
    ///
    /// Captures that normalize to an empty string count as no match.
    pub fn find(&self, text: &str) -> Option<FieldMatch> {
        let capture = self.regex.captures(text)?.name(&self.field)?;
        let value = normalize_str(capture.as_str());

        if value.is_empty() {
            return None;
        }

        Some(FieldMatch {
            value,
            source: capture.as_str().to_string(),
            position: (capture.start(), capture.end()),
        })
    }
}

/// Ordered field patterns for one document type.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<FieldPattern>,
}

impl PatternSet {
    /// Number of fields in the set.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Patterns in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldPattern> {
        self.patterns.iter()
    }

    /// Pattern for a field, if declared.
    pub fn get(&self, field: &str) -> Option<&FieldPattern> {
        self.patterns.iter().find(|p| p.field == field)
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> Vec<&str> {
        self.patterns.iter().map(|p| p.field()).collect()
    }
}

/// Read-only mapping from document type to its pattern set.
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    sets: HashMap<DocumentType, PatternSet>,
}

impl PatternRegistry {
    /// Start an empty registry.
    pub fn builder() -> PatternRegistryBuilder {
        PatternRegistryBuilder::default()
    }

    /// Registry with the built-in pattern table of every document type.
    pub fn builtin() -> Result<Self, RegistryError> {
        DocumentType::ALL
            .into_iter()
            .fold(Self::builder(), |builder, t| {
                builder.register(t, t.builtin_patterns())
            })
            .build()
    }

    /// Pattern set for a document type.
    pub fn get(&self, document_type: DocumentType) -> Option<&PatternSet> {
        self.sets.get(&document_type)
    }

    /// Whether the type has a registered set.
    pub fn contains(&self, document_type: DocumentType) -> bool {
        self.sets.contains_key(&document_type)
    }

    /// Registered document types in declaration order.
    pub fn document_types(&self) -> Vec<DocumentType> {
        DocumentType::ALL
            .into_iter()
            .filter(|t| self.contains(*t))
            .collect()
    }
}

/// Builder for [`PatternRegistry`].
///
/// Patterns are validated in [`build`](Self::build), so a malformed table
/// fails at startup instead of at first use.
#[derive(Debug, Default)]
pub struct PatternRegistryBuilder {
    tables: Vec<(DocumentType, Vec<(String, String)>)>,
}

impl PatternRegistryBuilder {
    /// Register `(field, pattern)` pairs for a document type, replacing any
    /// earlier registration for it.
    pub fn register<F, P>(mut self, document_type: DocumentType, patterns: &[(F, P)]) -> Self
    where
        F: AsRef<str>,
        P: AsRef<str>,
    {
        let table = patterns
            .iter()
            .map(|(f, p)| (f.as_ref().to_string(), p.as_ref().to_string()))
            .collect();

        self.tables.retain(|(t, _)| *t != document_type);
        self.tables.push((document_type, table));
        self
    }

    /// Compile and validate every registered table.
    pub fn build(self) -> Result<PatternRegistry, RegistryError> {
        let mut sets = HashMap::with_capacity(self.tables.len());

        for (document_type, table) in self.tables {
            let mut patterns: Vec<FieldPattern> = Vec::with_capacity(table.len());

            for (field, pattern) in &table {
                if RESERVED_FIELDS.contains(&field.as_str()) {
                    return Err(RegistryError::ReservedField {
                        document_type,
                        field: field.clone(),
                    });
                }
                if patterns.iter().any(|p| p.field == *field) {
                    return Err(RegistryError::DuplicateField {
                        document_type,
                        field: field.clone(),
                    });
                }
                patterns.push(FieldPattern::new(document_type, field, pattern)?);
            }

            debug!("Registered {} field patterns for {}", patterns.len(), document_type);
            sets.insert(document_type, PatternSet { patterns });
        }

        Ok(PatternRegistry { sets })
    }
}
