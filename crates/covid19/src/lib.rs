//! COVID-19 reference-data module for the EMR platform.
//!
//! The module is a lifecycle hook: when the host starts it, the activator
//! idempotently ensures a small set of reference records exists in the
//! platform database (the country-where-diagnosed concept and its CIEL
//! re-codings, the two COVID-19 encounter types) and, when the optional
//! html-form collaborator is installed, imports the bundled form
//! definitions. Shutdown only logs.
//!
//! All persistence goes through the service traits in `emr_api`; the
//! module performs no local recovery or retries and propagates every
//! platform error to the host's lifecycle manager.

pub mod activator;
pub mod config;
pub mod constants;
pub mod forms;

pub use activator::Covid19Activator;
pub use config::{resolve_htmlforms_dir, ModuleConfig};

use std::path::PathBuf;

/// Errors returned by the module's lifecycle hook.
#[derive(Debug, thiserror::Error)]
pub enum ModuleError {
    #[error("platform API error: {0}")]
    Api(#[from] emr_api::ApiError),

    #[error("invalid module configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read forms directory {path}: {source}", path = path.display())]
    FormsDirRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read form file {path}: {source}", path = path.display())]
    FormRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Type alias for Results that can fail with a [`ModuleError`].
pub type ModuleResult<T> = Result<T, ModuleError>;
