//! Fixed identifiers and names the module must preserve bit-exact.
//!
//! These match the records already deployed against live platform
//! databases; changing any of them would duplicate reference data on the
//! next startup.

/// Uuid of the country-where-diagnosed concept. Doubles as the sentinel
/// guarding the whole concept-seeding routine.
pub const COUNTRY_DIAGNOSED_CONCEPT_UUID: &str = "165903A";

/// Preferred English name of the country-where-diagnosed concept.
pub const COUNTRY_DIAGNOSED_CONCEPT_NAME: &str = "Country where diagnosed";

/// Coding scheme the mapped codes below belong to.
pub const CONCEPT_SOURCE_CIEL: &str = "CIEL";

/// CIEL code of the concept linked as the answer to the
/// country-where-diagnosed question.
pub const CIEL_COUNTRY_ANSWER_CODE: &str = "165820";

/// CIEL code of the concept re-typed to free text.
pub const CIEL_TEXT_RECODE: &str = "162689";

/// CIEL codes of the concepts re-typed to coded answers.
pub const CIEL_CODED_RECODES: [&str; 2] = ["165198", "165655"];

/// CIEL code of the concept re-classed as a finding.
pub const CIEL_FINDING_RECODE: &str = "165795";

/// Uuid and name of the screening encounter type. The name doubles as the
/// idempotency guard for encounter-type seeding.
pub const SCREENING_ENCOUNTER_TYPE_UUID: &str = "0dbe80d4-e174-43f8-8636-e28e5d840034";
pub const SCREENING_ENCOUNTER_TYPE_NAME: &str = "COVID-19 Screening";

/// Uuid and name of the case-reporting encounter type.
pub const CASE_REPORT_ENCOUNTER_TYPE_UUID: &str = "cfb13c00-ffcc-4e98-8bc0-60d50e7d34ee";
pub const CASE_REPORT_ENCOUNTER_TYPE_NAME: &str = "COVID-19 Case Reporting";

/// Locale for seeded concept names.
pub const ENGLISH_LOCALE: &str = "en";

/// Platform datatype rows looked up by name.
pub const DATATYPE_CODED: &str = "Coded";
pub const DATATYPE_TEXT: &str = "Text";

/// Platform classification rows looked up by name.
pub const CLASS_QUESTION: &str = "Question";
pub const CLASS_FINDING: &str = "Finding";

/// Bundled form-definition directory, relative to the crate root.
pub const HTMLFORMS_DIR: &str = "resources/htmlforms";

/// Extension of form-definition files within [`HTMLFORMS_DIR`].
pub const FORM_FILE_EXTENSION: &str = "html";
