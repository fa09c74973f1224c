//! Module lifecycle hook.
//!
//! Runs once when the host starts the module and once when it shuts it
//! down. Startup seeds reference data idempotently: a sentinel lookup
//! gates each seeding routine, so a second activation against an already
//! seeded database performs no writes.

use std::fs;
use std::sync::Arc;

use emr_api::{
    ApiError, Concept, ConceptAnswer, ConceptClass, ConceptDatatype, ConceptName, ConceptService,
    EncounterService, EncounterType, FormService, HtmlFormService, ServiceContext,
};

use crate::config::ModuleConfig;
use crate::constants::{
    CASE_REPORT_ENCOUNTER_TYPE_NAME, CASE_REPORT_ENCOUNTER_TYPE_UUID, CIEL_CODED_RECODES,
    CIEL_COUNTRY_ANSWER_CODE, CIEL_FINDING_RECODE, CIEL_TEXT_RECODE, CLASS_FINDING,
    CLASS_QUESTION, CONCEPT_SOURCE_CIEL, COUNTRY_DIAGNOSED_CONCEPT_NAME,
    COUNTRY_DIAGNOSED_CONCEPT_UUID, DATATYPE_CODED, DATATYPE_TEXT, ENGLISH_LOCALE,
    SCREENING_ENCOUNTER_TYPE_NAME, SCREENING_ENCOUNTER_TYPE_UUID,
};
use crate::{forms, ModuleError, ModuleResult};

/// Startup/shutdown hook for the COVID-19 module.
pub struct Covid19Activator {
    context: Arc<ServiceContext>,
    config: ModuleConfig,
}

impl Covid19Activator {
    /// Create the activator.
    ///
    /// The context must come from the host after its persistence services
    /// are ready; the activator fails hard on first use otherwise.
    pub fn new(context: Arc<ServiceContext>, config: ModuleConfig) -> Self {
        Self { context, config }
    }

    /// Startup hook.
    ///
    /// In order: ensure the seeded concepts exist, ensure the two
    /// encounter types exist, then import bundled form definitions when
    /// the html-form collaborator is installed.
    ///
    /// # Errors
    ///
    /// Propagates every platform error unchanged. A missing required
    /// service surfaces as [`ApiError::ServiceNotReady`]; an absent
    /// html-form collaborator is not an error and skips the import step.
    pub fn started(&self) -> ModuleResult<()> {
        tracing::info!("Started COVID-19 module");

        let concept_service = self.context.concept_service()?;
        let encounter_service = self.context.encounter_service()?;
        let form_service = self.context.form_service()?;

        if concept_service
            .concept_by_uuid(COUNTRY_DIAGNOSED_CONCEPT_UUID)?
            .is_none()
        {
            self.setup_concepts(concept_service.as_ref())?;
        }

        if encounter_service
            .encounter_type_by_name(SCREENING_ENCOUNTER_TYPE_NAME)?
            .is_none()
        {
            self.setup_encounter_types(encounter_service.as_ref())?;
        }

        match self.context.html_form_service() {
            Some(html_form_service) => {
                self.import_html_forms(form_service.as_ref(), html_form_service.as_ref())?;
            }
            None => {
                tracing::debug!("html-form collaborator not installed, skipping form import");
            }
        }

        tracing::info!("COVID-19 reference data is in place");
        Ok(())
    }

    /// Shutdown hook. Logs and changes no state.
    pub fn shutdown(&self) {
        tracing::info!("Shutdown COVID-19 module");
    }

    fn setup_concepts(&self, concepts: &dyn ConceptService) -> ModuleResult<()> {
        tracing::debug!("seeding COVID-19 concepts");

        let coded = datatype(concepts, DATATYPE_CODED)?;

        let mut country_diagnosed = Concept::new().with_uuid(COUNTRY_DIAGNOSED_CONCEPT_UUID);
        country_diagnosed.add_name(ConceptName::preferred(
            COUNTRY_DIAGNOSED_CONCEPT_NAME,
            ENGLISH_LOCALE,
        ));
        country_diagnosed.set_class(class(concepts, CLASS_QUESTION)?);
        country_diagnosed.set_datatype(coded.clone());
        country_diagnosed.add_answer(ConceptAnswer::new(mapped_concept(
            concepts,
            CIEL_COUNTRY_ANSWER_CODE,
        )?));
        concepts.save_concept(country_diagnosed)?;

        let mut concept = mapped_concept(concepts, CIEL_TEXT_RECODE)?;
        concept.set_datatype(datatype(concepts, DATATYPE_TEXT)?);
        concepts.save_concept(concept)?;

        for code in CIEL_CODED_RECODES {
            let mut concept = mapped_concept(concepts, code)?;
            concept.set_datatype(coded.clone());
            concepts.save_concept(concept)?;
        }

        let mut concept = mapped_concept(concepts, CIEL_FINDING_RECODE)?;
        concept.set_class(class(concepts, CLASS_FINDING)?);
        concept.set_datatype(coded);
        // The upstream module mutated this concept without ever persisting
        // it, which left the finding re-class a dead write. Persist it.
        concepts.save_concept(concept)?;

        Ok(())
    }

    fn setup_encounter_types(&self, encounters: &dyn EncounterService) -> ModuleResult<()> {
        tracing::debug!("seeding COVID-19 encounter types");

        encounters.save_encounter_type(
            EncounterType::new(SCREENING_ENCOUNTER_TYPE_NAME)
                .with_uuid(SCREENING_ENCOUNTER_TYPE_UUID),
        )?;

        encounters.save_encounter_type(
            EncounterType::new(CASE_REPORT_ENCOUNTER_TYPE_NAME)
                .with_uuid(CASE_REPORT_ENCOUNTER_TYPE_UUID),
        )?;

        Ok(())
    }

    fn import_html_forms(
        &self,
        form_service: &dyn FormService,
        html_form_service: &dyn HtmlFormService,
    ) -> ModuleResult<()> {
        for path in forms::scan_form_files(self.config.htmlforms_dir())? {
            let definition =
                fs::read_to_string(&path).map_err(|source| ModuleError::FormRead {
                    path: path.clone(),
                    source,
                })?;

            let form = html_form_service.import(form_service, &definition)?;
            tracing::debug!(form = %form.name, file = %path.display(), "imported html form");
        }

        Ok(())
    }
}

/// Resolve a CIEL-mapped concept, failing when the vocabulary is missing.
fn mapped_concept(concepts: &dyn ConceptService, code: &str) -> ModuleResult<Concept> {
    concepts
        .concept_by_mapping(code, CONCEPT_SOURCE_CIEL)?
        .ok_or_else(|| {
            ApiError::MissingConcept {
                code: code.to_string(),
                source: CONCEPT_SOURCE_CIEL.to_string(),
            }
            .into()
        })
}

fn datatype(concepts: &dyn ConceptService, name: &str) -> ModuleResult<ConceptDatatype> {
    concepts
        .concept_datatype_by_name(name)?
        .ok_or_else(|| ApiError::MissingReference(format!("concept datatype {name}")).into())
}

fn class(concepts: &dyn ConceptService, name: &str) -> ModuleResult<ConceptClass> {
    concepts
        .concept_class_by_name(name)?
        .ok_or_else(|| ApiError::MissingReference(format!("concept class {name}")).into())
}
