//! Form definition records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A structured clinical data-entry form registered with the platform.
///
/// Form content authoring and parsing belong to the optional html-form
/// collaborator ([`HtmlFormService`](crate::HtmlFormService)); the platform
/// only stores the form row itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    /// Platform identifier. `None` until first save unless fixed up front.
    pub uuid: Option<String>,

    /// Unique display name.
    pub name: String,

    /// Author-assigned version string.
    pub version: String,

    /// Set by the platform on first save.
    pub date_created: Option<DateTime<Utc>>,
}

impl Form {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            uuid: None,
            name: name.into(),
            version: version.into(),
            date_created: None,
        }
    }

    #[must_use]
    pub fn with_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.uuid = Some(uuid.into());
        self
    }
}
