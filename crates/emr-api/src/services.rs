//! Service traits a module calls into.
//!
//! All operations are synchronous call/response against the platform's
//! persistence layer. Lookups return `Ok(None)` when no record matches;
//! saves return the persisted record with identity and audit fields
//! assigned. Implementations own transactions and validation.

use crate::concept::{Concept, ConceptClass, ConceptDatatype};
use crate::encounter::EncounterType;
use crate::form::Form;
use crate::ApiResult;

/// Lookup and creation of clinical concepts and their reference rows.
pub trait ConceptService: Send + Sync {
    /// Fetch a concept by its platform uuid.
    fn concept_by_uuid(&self, uuid: &str) -> ApiResult<Option<Concept>>;

    /// Resolve a concept through an external coding-scheme mapping, for
    /// example code `165820` in source `CIEL`.
    fn concept_by_mapping(&self, code: &str, source: &str) -> ApiResult<Option<Concept>>;

    /// Fetch a datatype reference row by name (`Coded`, `Text`, ...).
    fn concept_datatype_by_name(&self, name: &str) -> ApiResult<Option<ConceptDatatype>>;

    /// Fetch a classification reference row by name (`Question`, `Finding`, ...).
    fn concept_class_by_name(&self, name: &str) -> ApiResult<Option<ConceptClass>>;

    /// Persist a concept, assigning a uuid and `date_created` when absent.
    fn save_concept(&self, concept: Concept) -> ApiResult<Concept>;
}

/// Lookup and creation of encounter types.
pub trait EncounterService: Send + Sync {
    fn encounter_type_by_name(&self, name: &str) -> ApiResult<Option<EncounterType>>;

    fn encounter_type_by_uuid(&self, uuid: &str) -> ApiResult<Option<EncounterType>>;

    /// Persist an encounter type, assigning a uuid and `date_created` when
    /// absent.
    fn save_encounter_type(&self, encounter_type: EncounterType) -> ApiResult<EncounterType>;
}

/// Lookup and creation of form rows.
pub trait FormService: Send + Sync {
    fn form_by_name(&self, name: &str) -> ApiResult<Option<Form>>;

    /// Persist a form row, assigning a uuid and `date_created` when absent.
    fn save_form(&self, form: Form) -> ApiResult<Form>;
}

/// Optional html-form collaborator.
///
/// Parses an authored form-definition document and registers it with the
/// platform, deduplicating against forms that already exist. Hosts that do
/// not install the collaborator simply leave it out of the
/// [`ServiceContext`](crate::ServiceContext); its absence is a designed
/// degraded mode, never an error.
pub trait HtmlFormService: Send + Sync {
    /// Import one form-definition document, persisting through `forms`.
    ///
    /// Returns the existing form unchanged when one with the same name is
    /// already registered.
    fn import(&self, forms: &dyn FormService, definition: &str) -> ApiResult<Form>;
}
