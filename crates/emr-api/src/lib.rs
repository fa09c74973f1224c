//! Service API surface of the EMR platform, as consumed by platform modules.
//!
//! This crate defines the boundary a module sees when it talks to the host
//! platform's persistence layer:
//! - domain record types (concepts, encounter types, forms)
//! - object-safe service traits for lookup and creation of those records
//! - a [`ServiceContext`] registry the host populates once its persistence
//!   services are ready, which modules receive instead of reaching into
//!   host internals
//! - an in-memory reference implementation of every service trait
//!   ([`memory::MemoryStore`]), used by tests and by hosts that want a
//!   self-contained backing store
//!
//! The real platform owns validation, identity assignment, transactions and
//! referential integrity. Nothing in this crate attempts to replicate that
//! beyond what a module needs to exercise its own contract.

pub mod concept;
pub mod context;
pub mod encounter;
pub mod form;
pub mod memory;
pub mod services;

// Re-export facades
pub use concept::{
    Concept, ConceptAnswer, ConceptClass, ConceptDatatype, ConceptMapping, ConceptName,
};
pub use context::ServiceContext;
pub use encounter::EncounterType;
pub use form::Form;
pub use memory::{MemoryHtmlFormService, MemoryStore};
pub use services::{ConceptService, EncounterService, FormService, HtmlFormService};

/// Errors returned by the platform service API.
//
// `Display`/`Error` are implemented by hand rather than via `thiserror`
// because `MissingConcept`'s `source` field is a vocabulary source name,
// not an error cause, and the derive would treat it as `Error::source`.
#[derive(Debug)]
pub enum ApiError {
    ServiceNotReady(&'static str),

    MissingConcept { code: String, source: String },

    MissingReference(String),

    InvalidRecord(String),

    Storage(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::ServiceNotReady(name) => {
                write!(f, "{name} is not registered with the service context")
            }
            ApiError::MissingConcept { code, source } => {
                write!(f, "no concept is mapped to code {code} in source {source}")
            }
            ApiError::MissingReference(what) => {
                write!(f, "missing platform reference row: {what}")
            }
            ApiError::InvalidRecord(why) => write!(f, "invalid record: {why}"),
            ApiError::Storage(why) => write!(f, "storage error: {why}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Type alias for Results that can fail with an [`ApiError`].
pub type ApiResult<T> = Result<T, ApiError>;
