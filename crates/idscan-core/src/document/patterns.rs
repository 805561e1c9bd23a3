//! Built-in field patterns for supported identity documents.
//!
//! Each pattern names its value with a capture group equal to the field
//! name. Patterns run against normalized single-line text and are compiled
//! case-insensitively, so labels are written in their printed form.

use lazy_static::lazy_static;

use super::{DocumentType, PatternRegistry};

/// Accepted date styles: DD-MM-YYYY, DD/MM/YYYY, DD.MM.YYYY.
///
/// Data classes are ASCII only: `\d` would also take other scripts' digits.
macro_rules! date {
    () => {
        r"[0-9]{2}-[0-9]{2}-[0-9]{4}|[0-9]{2}/[0-9]{2}/[0-9]{4}|[0-9]{2}\.[0-9]{2}\.[0-9]{4}"
    };
}

/// Driving license fields.
pub const DRIVING_LICENSE: &[(&str, &str)] = &[
    // `(?-u:...)` keeps case folding ASCII, so U+212A KELVIN SIGN is not a `K`.
    (
        "licenseNumber",
        r"(?P<licenseNumber>(?-u:[A-Z]{2})[0-9]{2}\s*[0-9]+)",
    ),
    // Stops before the next "Date ..." label.
    ("name", r"Name\s*:\s*(?P<name>.*?)\s+Date"),
    (
        "dateOfBirth",
        concat!(r"Date Of Birth\s*:\s*(?P<dateOfBirth>", date!(), ")"),
    ),
    ("address", r"(?s)Address:\s*(?P<address>.*?)\s*$"),
];

/// Passport data page fields.
pub const PASSPORT: &[(&str, &str)] = &[
    (
        "passportNumber",
        r"Passport\s*(?:No\.?|Number)\s*:?\s*(?P<passportNumber>(?-u:[A-Z0-9]{6,9}))\b",
    ),
    ("surname", r"Surname\s*:\s*(?P<surname>.*?)\s+Given\s+Names?"),
    (
        "givenNames",
        r"Given\s+Names?\s*:\s*(?P<givenNames>.*?)\s+Nationality",
    ),
    ("nationality", r"Nationality\s*:\s*(?P<nationality>.*?)\s+Date"),
    (
        "dateOfBirth",
        concat!(r"Date Of Birth\s*:\s*(?P<dateOfBirth>", date!(), ")"),
    ),
    (
        "dateOfExpiry",
        concat!(r"Date Of Expiry\s*:\s*(?P<dateOfExpiry>", date!(), ")"),
    ),
];

impl DocumentType {
    /// Built-in `(field, pattern)` table for this document type.
    pub fn builtin_patterns(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::DrivingLicense => DRIVING_LICENSE,
            Self::Passport => PASSPORT,
        }
    }
}

lazy_static! {
    /// Process-wide registry built from the tables above.
    pub static ref REGISTRY: PatternRegistry = PatternRegistry::builtin()
        .expect("built-in document patterns are valid");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_tables_compile() {
        let registry = PatternRegistry::builtin().unwrap();
        for t in DocumentType::ALL {
            let set = registry.get(t).unwrap();
            assert_eq!(set.len(), t.builtin_patterns().len());
        }
    }

    #[test]
    fn test_license_number_with_and_without_space() {
        let set = REGISTRY.get(DocumentType::DrivingLicense).unwrap();
        let pattern = set.get("licenseNumber").unwrap();

        assert_eq!(pattern.find("AB12 123456").unwrap().value, "AB12 123456");
        assert_eq!(pattern.find("xy991234").unwrap().value, "xy991234");
        assert!(pattern.find("A112 123456").is_none());
    }

    #[test]
    fn test_date_styles() {
        let set = REGISTRY.get(DocumentType::DrivingLicense).unwrap();
        let pattern = set.get("dateOfBirth").unwrap();

        for date in ["01-02-1990", "01/02/1990", "01.02.1990"] {
            let text = format!("Date Of Birth : {}", date);
            assert_eq!(pattern.find(&text).unwrap().value, date);
        }
        assert!(pattern.find("Date Of Birth : 1990-02-01").is_none());
    }

    #[test]
    fn test_non_ascii_data_rejected() {
        let license = REGISTRY.get(DocumentType::DrivingLicense).unwrap();
        let passport = REGISTRY.get(DocumentType::Passport).unwrap();

        let dob = license.get("dateOfBirth").unwrap();
        assert!(dob.find("Date Of Birth : \u{661}\u{662}-\u{660}\u{662}-\u{661}\u{669}\u{669}\u{660}").is_none());
        assert!(dob.find("Date Of Birth : \u{ff10}\u{ff11}.02.1990").is_none());

        let number = license.get("licenseNumber").unwrap();
        assert!(number.find("\u{212A}A12 345678").is_none());
        assert_eq!(number.find("kA12 345678").unwrap().value, "kA12 345678");

        let passport_number = passport.get("passportNumber").unwrap();
        assert!(passport_number.find("Passport No: \u{661}\u{662}\u{663}\u{664}\u{665}\u{666}\u{667}").is_none());
        assert!(passport_number.find("Passport No: \u{212A}12345678").is_none());
    }

    #[test]
    fn test_name_stops_before_date_label() {
        let set = REGISTRY.get(DocumentType::DrivingLicense).unwrap();
        let pattern = set.get("name").unwrap();

        let found = pattern
            .find("Name : Jane Mary Doe Date Of Birth : 03.04.1985")
            .unwrap();
        assert_eq!(found.value, "Jane Mary Doe");

        // No following label means no boundary, so no match.
        assert!(pattern.find("Name : Jane Doe").is_none());
    }

    #[test]
    fn test_address_runs_to_end() {
        let set = REGISTRY.get(DocumentType::DrivingLicense).unwrap();
        let pattern = set.get("address").unwrap();

        let found = pattern.find("Address: 12 High Street, Leeds LS1 4AP ").unwrap();
        assert_eq!(found.value, "12 High Street, Leeds LS1 4AP");
    }

    #[test]
    fn test_passport_fields() {
        let set = REGISTRY.get(DocumentType::Passport).unwrap();
        let text = "PASSPORT Passport No: 123456789 Surname: SMITH Given Names: JOHN PAUL \
                    Nationality: BRITISH CITIZEN Date Of Birth: 01.02.1990 \
                    Date Of Expiry: 01/02/2030";

        let value = |field: &str| set.get(field).unwrap().find(text).map(|m| m.value);

        assert_eq!(value("passportNumber").as_deref(), Some("123456789"));
        assert_eq!(value("surname").as_deref(), Some("SMITH"));
        assert_eq!(value("givenNames").as_deref(), Some("JOHN PAUL"));
        assert_eq!(value("nationality").as_deref(), Some("BRITISH CITIZEN"));
        assert_eq!(value("dateOfBirth").as_deref(), Some("01.02.1990"));
        assert_eq!(value("dateOfExpiry").as_deref(), Some("01/02/2030"));
    }
}
