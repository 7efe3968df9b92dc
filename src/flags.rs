//! Run flags and their validation.
//!
//! The command line is parsed loosely into [`RawFlags`] so that a flag given
//! with or without a value can be told apart. [`RunFlags::validate`] is the
//! only way to obtain a [`RunFlags`], so an invalid combination never reaches
//! the orchestrator.

use std::path::{Path, PathBuf};

/// How a flag appeared on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FlagValue {
    #[default]
    Absent,
    /// Given without a value.
    Switch,
    Value(String),
}

impl FlagValue {
    pub fn is_present(&self) -> bool {
        !matches!(self, FlagValue::Absent)
    }
}

impl From<Option<Option<String>>> for FlagValue {
    fn from(value: Option<Option<String>>) -> Self {
        match value {
            None => FlagValue::Absent,
            Some(None) => FlagValue::Switch,
            Some(Some(value)) => FlagValue::Value(value),
        }
    }
}

/// Flags exactly as parsed, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFlags {
    pub ignore_incompatible: Option<bool>,
    pub ignore_missing: Option<bool>,
    pub ignore_unused: Option<bool>,
    pub ignore_untracked: FlagValue,
    pub include_config: FlagValue,
    pub fix: FlagValue,
    pub path: FlagValue,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlagError {
    #[error(
        "incompatible flags: none of --ignore-incompatible, --ignore-unused, --ignore-missing or --ignore-untracked is allowed when --fix is set"
    )]
    IncompatibleFlags,
    #[error("flags require a value: {flag} must be followed by a path")]
    MissingValue { flag: &'static str },
    #[error("flag cannot have a value: {flag} is a switch, got \"{value}\"")]
    UnexpectedValue { flag: &'static str, value: String },
}

/// Validated flags for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunFlags {
    ignore_incompatible: bool,
    ignore_missing: bool,
    ignore_unused: bool,
    ignore_untracked: bool,
    fix: bool,
    include_config: Option<PathBuf>,
    path: Option<PathBuf>,
}

impl RunFlags {
    /// Reject invalid flag combinations.
    ///
    /// Checks run in a fixed order so the same input always yields the
    /// same error: `--fix` exclusivity, then missing values, then values on
    /// switches.
    pub fn validate(raw: RawFlags) -> Result<Self, FlagError> {
        let fix_set = raw.fix == FlagValue::Switch;
        let any_ignore = raw.ignore_incompatible.is_some()
            || raw.ignore_unused.is_some()
            || raw.ignore_missing.is_some()
            || raw.ignore_untracked.is_present();
        if fix_set && any_ignore {
            return Err(FlagError::IncompatibleFlags);
        }

        let path = required_value("--path", raw.path)?;
        let include_config = required_value("--include-config", raw.include_config)?;

        let fix = switch("--fix", raw.fix)?;
        let ignore_untracked = switch("--ignore-untracked", raw.ignore_untracked)?;

        Ok(Self {
            ignore_incompatible: raw.ignore_incompatible.unwrap_or(false),
            ignore_missing: raw.ignore_missing.unwrap_or(false),
            ignore_unused: raw.ignore_unused.unwrap_or(false),
            ignore_untracked,
            fix,
            include_config: include_config.map(PathBuf::from),
            path: path.map(PathBuf::from),
        })
    }

    pub fn fix(&self) -> bool {
        self.fix
    }

    pub fn ignore_untracked(&self) -> bool {
        self.ignore_untracked
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn include_config(&self) -> Option<&Path> {
        self.include_config.as_deref()
    }

    /// `--fix` tolerates incompatible translations while repairing them.
    pub fn tolerate_incompatible(&self) -> bool {
        self.fix || self.ignore_incompatible
    }

    pub fn tolerate_unused(&self) -> bool {
        self.fix || self.ignore_unused
    }

    pub fn tolerate_missing(&self) -> bool {
        self.fix || self.ignore_missing
    }
}

fn required_value(flag: &'static str, value: FlagValue) -> Result<Option<String>, FlagError> {
    match value {
        FlagValue::Absent => Ok(None),
        FlagValue::Value(value) if !value.is_empty() => Ok(Some(value)),
        FlagValue::Switch | FlagValue::Value(_) => Err(FlagError::MissingValue { flag }),
    }
}

fn switch(flag: &'static str, value: FlagValue) -> Result<bool, FlagError> {
    match value {
        FlagValue::Absent => Ok(false),
        FlagValue::Switch => Ok(true),
        FlagValue::Value(value) => Err(FlagError::UnexpectedValue { flag, value }),
    }
}
