//! Service registry handed to modules at startup.
//!
//! The host constructs a [`ServiceContext`] once its persistence services
//! are ready and passes it to each module's activator. This replaces any
//! need for modules to probe host internals: a module that runs before the
//! context is fully populated gets a hard
//! [`ApiError::ServiceNotReady`](crate::ApiError::ServiceNotReady) instead
//! of a half-initialised platform.

use std::sync::Arc;

use crate::services::{ConceptService, EncounterService, FormService, HtmlFormService};
use crate::{ApiError, ApiResult};

/// Registry of the platform services available to modules.
///
/// The three persistence services are required; the html-form collaborator
/// is an explicit capability slot that stays empty when the companion
/// module is not installed.
#[derive(Default)]
pub struct ServiceContext {
    concept_service: Option<Arc<dyn ConceptService>>,
    encounter_service: Option<Arc<dyn EncounterService>>,
    form_service: Option<Arc<dyn FormService>>,
    html_form_service: Option<Arc<dyn HtmlFormService>>,
}

impl ServiceContext {
    /// Create an empty context. The host registers services before handing
    /// the context to any module.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_concept_service(&mut self, service: Arc<dyn ConceptService>) {
        self.concept_service = Some(service);
    }

    pub fn register_encounter_service(&mut self, service: Arc<dyn EncounterService>) {
        self.encounter_service = Some(service);
    }

    pub fn register_form_service(&mut self, service: Arc<dyn FormService>) {
        self.form_service = Some(service);
    }

    /// Install the optional html-form collaborator.
    pub fn register_html_form_service(&mut self, service: Arc<dyn HtmlFormService>) {
        self.html_form_service = Some(service);
    }

    /// The concept service.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ServiceNotReady`] when the host has not
    /// registered one; callers are expected to propagate this as a fatal
    /// startup failure.
    pub fn concept_service(&self) -> ApiResult<Arc<dyn ConceptService>> {
        self.concept_service
            .clone()
            .ok_or(ApiError::ServiceNotReady("concept service"))
    }

    /// The encounter service.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ServiceNotReady`] when the host has not
    /// registered one.
    pub fn encounter_service(&self) -> ApiResult<Arc<dyn EncounterService>> {
        self.encounter_service
            .clone()
            .ok_or(ApiError::ServiceNotReady("encounter service"))
    }

    /// The form service.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ServiceNotReady`] when the host has not
    /// registered one.
    pub fn form_service(&self) -> ApiResult<Arc<dyn FormService>> {
        self.form_service
            .clone()
            .ok_or(ApiError::ServiceNotReady("form service"))
    }

    /// The optional html-form collaborator, `None` when the companion
    /// module is not installed.
    pub fn html_form_service(&self) -> Option<Arc<dyn HtmlFormService>> {
        self.html_form_service.clone()
    }
}
