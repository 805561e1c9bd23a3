//! Applying a pattern set to normalized text.

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use crate::document::PatternSet;

/// One extracted field: a clean value or absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedField {
    pub name: String,
    pub value: Option<String>,
}

/// Extracted fields in pattern declaration order.
///
/// Serializes as a map of field name to string or `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    fields: Vec<ExtractedField>,
}

impl ExtractedFields {
    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields that have a value.
    pub fn filled(&self) -> usize {
        self.fields.iter().filter(|f| f.value.is_some()).count()
    }

    /// Whether the field was declared.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// Value of a field; `None` if absent or undeclared.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .and_then(|f| f.value.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExtractedField> {
        self.fields.iter()
    }
}

impl FromIterator<ExtractedField> for ExtractedFields {
    fn from_iter<I: IntoIterator<Item = ExtractedField>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl Serialize for ExtractedFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for field in &self.fields {
            map.serialize_entry(&field.name, &field.value)?;
        }
        map.end()
    }
}

/// Runs every pattern of a set over normalized text.
pub struct FieldExtractor<'a> {
    patterns: &'a PatternSet,
}

impl<'a> FieldExtractor<'a> {
    pub fn new(patterns: &'a PatternSet) -> Self {
        Self { patterns }
    }

    /// Extract every declared field; unmatched fields are recorded as absent.
    pub fn extract(&self, normalized_text: &str) -> ExtractedFields {
        self.patterns
            .iter()
            .map(|pattern| {
                let found = pattern.find(normalized_text);
                match &found {
                    Some(m) => debug!(
                        "Matched {} at {}..{}: {:?}",
                        pattern.field(),
                        m.position.0,
                        m.position.1,
                        m.value
                    ),
                    None => debug!("No match for {}", pattern.field()),
                }

                ExtractedField {
                    name: pattern.field().to_string(),
                    value: found.map(|m| m.value),
                }
            })
            .collect()
    }
}
