//! In-memory implementation of the platform service traits.
//!
//! [`MemoryStore`] stands in for the platform's persistence layer: it
//! assigns identifiers, stamps audit fields, resolves coding-scheme
//! mappings and enforces the minimal validation the real services would.
//! It ships with the platform's stock datatype and classification rows so
//! modules can look them up by name the way they would against a live
//! database.
//!
//! Hosts embed it behind `Arc` and register the same instance for each of
//! the service traits it implements.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use uuid::Uuid;

use crate::concept::{Concept, ConceptClass, ConceptDatatype, ConceptMapping, ConceptName};
use crate::encounter::EncounterType;
use crate::form::Form;
use crate::services::{ConceptService, EncounterService, FormService, HtmlFormService};
use crate::{ApiError, ApiResult};

/// Stock datatype rows present in every platform database.
const STOCK_DATATYPES: [&str; 3] = ["Coded", "Text", "Numeric"];

/// Stock classification rows present in every platform database.
const STOCK_CLASSES: [&str; 3] = ["Question", "Finding", "Misc"];

#[derive(Default)]
struct StoreInner {
    /// Concepts keyed by platform uuid.
    concepts: HashMap<String, Concept>,

    /// `(code, source)` to concept uuid.
    mappings: HashMap<(String, String), String>,

    datatypes: Vec<ConceptDatatype>,
    classes: Vec<ConceptClass>,

    /// Encounter types keyed by platform uuid.
    encounter_types: HashMap<String, EncounterType>,

    /// Forms keyed by platform uuid.
    forms: HashMap<String, Form>,
}

/// In-memory backing store implementing every platform service trait.
///
/// Save counters track trait-level write calls only; seeding helpers such
/// as [`MemoryStore::seed_mapped_concept`] bypass them, so tests can assert
/// exactly how many writes a module performed.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<StoreInner>,
    concept_saves: AtomicU64,
    encounter_type_saves: AtomicU64,
    form_saves: AtomicU64,
}

impl MemoryStore {
    /// Create a store seeded with the stock datatype and classification
    /// rows.
    pub fn new() -> Self {
        let store = Self::default();
        {
            // A fresh mutex cannot be poisoned.
            let mut inner = store.inner.lock().expect("fresh store lock");
            inner.datatypes = STOCK_DATATYPES
                .iter()
                .map(|name| ConceptDatatype {
                    uuid: Uuid::new_v4().to_string(),
                    name: (*name).to_string(),
                })
                .collect();
            inner.classes = STOCK_CLASSES
                .iter()
                .map(|name| ConceptClass {
                    uuid: Uuid::new_v4().to_string(),
                    name: (*name).to_string(),
                })
                .collect();
        }
        store
    }

    fn lock(&self) -> ApiResult<MutexGuard<'_, StoreInner>> {
        self.inner
            .lock()
            .map_err(|_| ApiError::Storage("memory store lock poisoned".into()))
    }

    /// Preload a concept resolvable through a coding-scheme mapping.
    ///
    /// This models vocabulary that already exists in the platform database
    /// (for example CIEL-mapped concepts) rather than a module write: the
    /// concept gets a generated uuid, a preferred English name, the `Text`
    /// datatype and the given mapping, and the save counters are not
    /// touched.
    pub fn seed_mapped_concept(
        &self,
        code: &str,
        source: &str,
        name: &str,
    ) -> ApiResult<Concept> {
        let mut inner = self.lock()?;

        let text = inner
            .datatypes
            .iter()
            .find(|d| d.name == "Text")
            .cloned()
            .ok_or_else(|| ApiError::MissingReference("concept datatype Text".into()))?;

        let uuid = Uuid::new_v4().to_string();
        let mut concept = Concept::new().with_uuid(uuid.clone());
        concept.add_name(ConceptName::preferred(name, "en"));
        concept.add_mapping(ConceptMapping::new(code, source));
        concept.set_datatype(text);
        concept.date_created = Some(Utc::now());

        inner
            .mappings
            .insert((code.to_string(), source.to_string()), uuid.clone());
        inner.concepts.insert(uuid, concept.clone());

        Ok(concept)
    }

    /// Number of concepts currently stored.
    pub fn concept_count(&self) -> ApiResult<usize> {
        Ok(self.lock()?.concepts.len())
    }

    /// Number of encounter types currently stored.
    pub fn encounter_type_count(&self) -> ApiResult<usize> {
        Ok(self.lock()?.encounter_types.len())
    }

    /// Number of forms currently stored.
    pub fn form_count(&self) -> ApiResult<usize> {
        Ok(self.lock()?.forms.len())
    }

    /// Trait-level `save_concept` calls observed so far.
    pub fn concept_saves(&self) -> u64 {
        self.concept_saves.load(Ordering::Relaxed)
    }

    /// Trait-level `save_encounter_type` calls observed so far.
    pub fn encounter_type_saves(&self) -> u64 {
        self.encounter_type_saves.load(Ordering::Relaxed)
    }

    /// Trait-level `save_form` calls observed so far.
    pub fn form_saves(&self) -> u64 {
        self.form_saves.load(Ordering::Relaxed)
    }
}

impl ConceptService for MemoryStore {
    fn concept_by_uuid(&self, uuid: &str) -> ApiResult<Option<Concept>> {
        Ok(self.lock()?.concepts.get(uuid).cloned())
    }

    fn concept_by_mapping(&self, code: &str, source: &str) -> ApiResult<Option<Concept>> {
        let inner = self.lock()?;
        let uuid = inner.mappings.get(&(code.to_string(), source.to_string()));
        Ok(uuid.and_then(|uuid| inner.concepts.get(uuid)).cloned())
    }

    fn concept_datatype_by_name(&self, name: &str) -> ApiResult<Option<ConceptDatatype>> {
        Ok(self
            .lock()?
            .datatypes
            .iter()
            .find(|d| d.name == name)
            .cloned())
    }

    fn concept_class_by_name(&self, name: &str) -> ApiResult<Option<ConceptClass>> {
        Ok(self.lock()?.classes.iter().find(|c| c.name == name).cloned())
    }

    fn save_concept(&self, mut concept: Concept) -> ApiResult<Concept> {
        if concept.names.is_empty() {
            return Err(ApiError::InvalidRecord(
                "concept must carry at least one name".into(),
            ));
        }

        let mut inner = self.lock()?;

        let uuid = concept
            .uuid
            .get_or_insert_with(|| Uuid::new_v4().to_string())
            .clone();
        if concept.date_created.is_none() {
            concept.date_created = Some(Utc::now());
        }

        for mapping in &concept.mappings {
            inner.mappings.insert(
                (mapping.code.clone(), mapping.source.clone()),
                uuid.clone(),
            );
        }
        inner.concepts.insert(uuid, concept.clone());
        self.concept_saves.fetch_add(1, Ordering::Relaxed);

        tracing::debug!(uuid = ?concept.uuid, "saved concept");
        Ok(concept)
    }
}

impl EncounterService for MemoryStore {
    fn encounter_type_by_name(&self, name: &str) -> ApiResult<Option<EncounterType>> {
        Ok(self
            .lock()?
            .encounter_types
            .values()
            .find(|et| et.name == name)
            .cloned())
    }

    fn encounter_type_by_uuid(&self, uuid: &str) -> ApiResult<Option<EncounterType>> {
        Ok(self.lock()?.encounter_types.get(uuid).cloned())
    }

    fn save_encounter_type(&self, mut encounter_type: EncounterType) -> ApiResult<EncounterType> {
        if encounter_type.name.trim().is_empty() {
            return Err(ApiError::InvalidRecord(
                "encounter type must carry a name".into(),
            ));
        }

        let mut inner = self.lock()?;

        let uuid = encounter_type
            .uuid
            .get_or_insert_with(|| Uuid::new_v4().to_string())
            .clone();
        if encounter_type.date_created.is_none() {
            encounter_type.date_created = Some(Utc::now());
        }

        inner.encounter_types.insert(uuid, encounter_type.clone());
        self.encounter_type_saves.fetch_add(1, Ordering::Relaxed);

        tracing::debug!(name = %encounter_type.name, "saved encounter type");
        Ok(encounter_type)
    }
}

impl FormService for MemoryStore {
    fn form_by_name(&self, name: &str) -> ApiResult<Option<Form>> {
        Ok(self
            .lock()?
            .forms
            .values()
            .find(|form| form.name == name)
            .cloned())
    }

    fn save_form(&self, mut form: Form) -> ApiResult<Form> {
        if form.name.trim().is_empty() {
            return Err(ApiError::InvalidRecord("form must carry a name".into()));
        }

        let mut inner = self.lock()?;

        let uuid = form
            .uuid
            .get_or_insert_with(|| Uuid::new_v4().to_string())
            .clone();
        if form.date_created.is_none() {
            form.date_created = Some(Utc::now());
        }

        inner.forms.insert(uuid, form.clone());
        self.form_saves.fetch_add(1, Ordering::Relaxed);

        tracing::debug!(name = %form.name, "saved form");
        Ok(form)
    }
}

/// Html-form collaborator over any [`FormService`].
///
/// Parses the `formName`, `formUuid` and `formVersion` attributes out of an
/// authored form-definition document and registers the form, returning the
/// existing row unchanged when one with the same name already exists.
#[derive(Default)]
pub struct MemoryHtmlFormService;

impl MemoryHtmlFormService {
    pub fn new() -> Self {
        Self
    }
}

impl HtmlFormService for MemoryHtmlFormService {
    fn import(&self, forms: &dyn FormService, definition: &str) -> ApiResult<Form> {
        let name = attribute(definition, "formName").ok_or_else(|| {
            ApiError::InvalidRecord("form definition has no formName attribute".into())
        })?;

        if let Some(existing) = forms.form_by_name(name)? {
            tracing::debug!(name = %name, "form already registered, skipping import");
            return Ok(existing);
        }

        let version = attribute(definition, "formVersion").unwrap_or("1.0");
        let mut form = Form::new(name, version);
        if let Some(uuid) = attribute(definition, "formUuid") {
            form = form.with_uuid(uuid);
        }

        let form = forms.save_form(form)?;
        tracing::debug!(name = %form.name, "imported form definition");
        Ok(form)
    }
}

/// Extract a double-quoted attribute value from a form-definition document.
fn attribute<'a>(definition: &'a str, name: &str) -> Option<&'a str> {
    let needle = format!("{name}=\"");
    let start = definition.find(&needle)? + needle.len();
    let rest = &definition[start..];
    let end = rest.find('"')?;
    Some(&rest[..end])
}
