//! Message catalog, error reporting and the built-in collaborators the
//! orchestrator schedules.
//!
//! - `labels`, `sources`: find i18n labels in JS/TS files
//! - `untracked`: labels outside every configured namespace
//! - `defaults`: default message extraction into a [`MessageCatalog`]
//! - `integrate`: translation file compatibility checks and fixes

pub mod catalog;
pub mod collaborators;
pub mod defaults;
pub mod integrate;
pub mod labels;
pub mod placeholders;
pub mod reporter;
pub mod sources;
pub mod untracked;

pub use catalog::{MessageCatalog, MessageDescriptor};
pub use collaborators::{
    Collaborators, DefaultMessageExtractor, ExtractionTask, Incompatibility, IntegrateOptions,
    IntegrationReport, LocaleIntegrator, UntrackedScanner,
};
pub use reporter::{ErrorReporter, FailError, ReportEntry, ReporterContext, is_fail_error};
