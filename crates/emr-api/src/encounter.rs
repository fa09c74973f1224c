//! Encounter type records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A category of clinical visit/interaction, for example "COVID-19
/// Screening".
///
/// Encounter types are looked up by name or uuid and persisted through
/// [`EncounterService::save_encounter_type`](crate::EncounterService::save_encounter_type).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterType {
    /// Platform identifier. `None` until first save unless fixed up front.
    pub uuid: Option<String>,

    /// Unique display name.
    pub name: String,

    /// Optional human-readable description.
    pub description: Option<String>,

    /// Set by the platform on first save.
    pub date_created: Option<DateTime<Utc>>,
}

impl EncounterType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uuid: None,
            name: name.into(),
            description: None,
            date_created: None,
        }
    }

    #[must_use]
    pub fn with_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.uuid = Some(uuid.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_fixes_uuid_and_name() {
        let encounter_type =
            EncounterType::new("COVID-19 Screening").with_uuid("0dbe80d4-e174-43f8-8636-e28e5d840034");

        assert_eq!(encounter_type.name, "COVID-19 Screening");
        assert_eq!(
            encounter_type.uuid.as_deref(),
            Some("0dbe80d4-e174-43f8-8636-e28e5d840034")
        );
        assert!(encounter_type.date_created.is_none());
    }
}
