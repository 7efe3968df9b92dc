//! i18n-check - default message extraction and translation compatibility checks
//!
//! Scans source files for i18n labels, builds a catalog of default messages
//! per namespace, and compares every configured translation file against it.
//! With `--fix` the translation files are rewritten in place.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, logging, output)
//! - `config`: `.i18nrc.json` loading and merging
//! - `core`: Catalog, error reporter and the built-in collaborators
//! - `flags`: Run flag validation
//! - `orchestrator`: Stage runner and final disposition
//! - `utils`: Shared path and text helpers

pub mod cli;
pub mod config;
pub mod core;
pub mod flags;
pub mod orchestrator;
pub mod utils;
