//! Clinical concept records.
//!
//! A concept is a coded data-dictionary entry (a question, a finding, an
//! answer) identified by a platform uuid or by an external coding-scheme
//! mapping such as a CIEL code. The platform assigns identity and audit
//! fields on save; this module only models the record shape a module
//! constructs and hands to the [`ConceptService`](crate::ConceptService).
//!
//! Notes:
//! - Concept uuids are free-form strings, not necessarily RFC 4122 (the
//!   platform accepts sentinel identifiers like `165903A`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A name attached to a concept in one locale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptName {
    /// Display text.
    pub name: String,

    /// Locale tag, for example `en`.
    pub locale: String,

    /// Whether this is the preferred name in its locale.
    pub locale_preferred: bool,
}

impl ConceptName {
    /// Create a non-preferred name in the given locale.
    pub fn new(name: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locale: locale.into(),
            locale_preferred: false,
        }
    }

    /// Create the locale-preferred name in the given locale.
    pub fn preferred(name: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            locale_preferred: true,
            ..Self::new(name, locale)
        }
    }
}

/// A platform datatype row (for example `Coded` or `Text`), looked up by name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptDatatype {
    pub uuid: String,
    pub name: String,
}

/// A platform classification row (for example `Question` or `Finding`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptClass {
    pub uuid: String,
    pub name: String,
}

/// An external vocabulary code attached to a concept.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptMapping {
    /// Code within the external source, for example `165820`.
    pub code: String,

    /// Coding scheme the code belongs to, for example `CIEL`.
    pub source: String,
}

impl ConceptMapping {
    pub fn new(code: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            source: source.into(),
        }
    }
}

/// A coded answer linked to a question concept.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConceptAnswer {
    /// The concept this answer resolves to.
    pub concept: Concept,
}

impl ConceptAnswer {
    pub fn new(concept: Concept) -> Self {
        Self { concept }
    }
}

/// A clinical concept record.
///
/// Constructed by modules and persisted through
/// [`ConceptService::save_concept`](crate::ConceptService::save_concept),
/// which assigns `uuid` (when absent) and `date_created`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Concept {
    /// Platform identifier. `None` until first save unless the module fixes
    /// it up front.
    pub uuid: Option<String>,

    /// Names in one or more locales. The platform requires at least one.
    pub names: Vec<ConceptName>,

    /// Classification (question, finding, ...).
    pub class: Option<ConceptClass>,

    /// Value datatype (coded, text, ...).
    pub datatype: Option<ConceptDatatype>,

    /// Linked answers, meaningful for coded datatypes.
    pub answers: Vec<ConceptAnswer>,

    /// External vocabulary codes resolving to this concept.
    pub mappings: Vec<ConceptMapping>,

    /// Set by the platform on first save.
    pub date_created: Option<DateTime<Utc>>,
}

impl Concept {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the platform identifier up front instead of letting the store
    /// assign one.
    #[must_use]
    pub fn with_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.uuid = Some(uuid.into());
        self
    }

    pub fn add_name(&mut self, name: ConceptName) {
        self.names.push(name);
    }

    pub fn add_answer(&mut self, answer: ConceptAnswer) {
        self.answers.push(answer);
    }

    pub fn add_mapping(&mut self, mapping: ConceptMapping) {
        self.mappings.push(mapping);
    }

    pub fn set_class(&mut self, class: ConceptClass) {
        self.class = Some(class);
    }

    pub fn set_datatype(&mut self, datatype: ConceptDatatype) {
        self.datatype = Some(datatype);
    }

    /// Returns the preferred name in the given locale, falling back to any
    /// name in that locale.
    pub fn preferred_name_in(&self, locale: &str) -> Option<&str> {
        self.names
            .iter()
            .find(|n| n.locale == locale && n.locale_preferred)
            .or_else(|| self.names.iter().find(|n| n.locale == locale))
            .map(|n| n.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preferred_name_wins_over_plain_name() {
        let mut concept = Concept::new();
        concept.add_name(ConceptName::new("Country diagnosed", "en"));
        concept.add_name(ConceptName::preferred("Country where diagnosed", "en"));
        concept.add_name(ConceptName::preferred("Pays du diagnostic", "fr"));

        assert_eq!(
            concept.preferred_name_in("en"),
            Some("Country where diagnosed")
        );
        assert_eq!(concept.preferred_name_in("fr"), Some("Pays du diagnostic"));
    }

    #[test]
    fn falls_back_to_any_name_in_locale() {
        let mut concept = Concept::new();
        concept.add_name(ConceptName::new("Travel history", "en"));

        assert_eq!(concept.preferred_name_in("en"), Some("Travel history"));
        assert_eq!(concept.preferred_name_in("sw"), None);
    }

    #[test]
    fn with_uuid_accepts_non_rfc4122_identifiers() {
        let concept = Concept::new().with_uuid("165903A");
        assert_eq!(concept.uuid.as_deref(), Some("165903A"));
    }

    #[test]
    fn concept_serialises_to_json() {
        let mut concept = Concept::new().with_uuid("165903A");
        concept.add_name(ConceptName::preferred("Country where diagnosed", "en"));
        concept.add_mapping(ConceptMapping::new("165820", "CIEL"));

        let json = serde_json::to_string(&concept).unwrap();
        assert!(json.contains("165903A"));
        assert!(json.contains("CIEL"));

        let back: Concept = serde_json::from_str(&json).unwrap();
        assert_eq!(back, concept);
    }
}
