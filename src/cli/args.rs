//! CLI argument definitions using clap.
//!
//! Flags that may be given bare or with a value are parsed as
//! `Option<Option<String>>` so validation can tell the two apart.

use clap::Parser;

use crate::flags::RawFlags;

#[derive(Debug, Parser)]
#[command(
    name = "i18n-check",
    author,
    version,
    about = "Extract default i18n messages and check translation files for compatibility",
    long_about = None
)]
pub struct Arguments {
    /// Tolerate translations whose placeholders differ from the default message
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub ignore_incompatible: Option<bool>,

    /// Tolerate messages that have no translation
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub ignore_missing: Option<bool>,

    /// Tolerate translations for messages that no longer exist
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub ignore_unused: Option<bool>,

    /// Skip the scan for files with labels outside any namespace
    #[arg(long, num_args = 0..=1, value_name = "NONE")]
    pub ignore_untracked: Option<Option<String>>,

    /// Additional .i18nrc.json merged on top of the root config
    #[arg(long, num_args = 0..=1, value_name = "PATH")]
    pub include_config: Option<Option<String>>,

    /// Rewrite translation files, dropping unused and incompatible entries
    #[arg(long, num_args = 0..=1, require_equals = true, value_name = "NONE")]
    pub fix: Option<Option<String>>,

    /// Limit the check to one source directory
    #[arg(long, num_args = 0..=1, value_name = "PATH")]
    pub path: Option<Option<String>>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Arguments {
    pub fn raw_flags(&self) -> RawFlags {
        RawFlags {
            ignore_incompatible: self.ignore_incompatible,
            ignore_missing: self.ignore_missing,
            ignore_unused: self.ignore_unused,
            ignore_untracked: self.ignore_untracked.clone().into(),
            include_config: self.include_config.clone().into(),
            fix: self.fix.clone().into(),
            path: self.path.clone().into(),
        }
    }
}
