//! Error types
//!
//! None of these reach the user: provider faults fall through to the next
//! tier, boot errors disable the prompt, settings errors fall back to defaults.

use thiserror::Error;

/// Failure of a single capability call on an external provider
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderFault {
    /// The provider does not expose this capability
    #[error("provider does not expose `{capability}`")]
    Missing { capability: &'static str },

    /// The capability threw
    #[error("`{capability}` threw: {message}")]
    Threw {
        capability: &'static str,
        message: String,
    },

    /// The capability returned something that is not a usable point
    #[error("`{capability}` returned a malformed result")]
    Malformed { capability: &'static str },
}

/// Reasons the interactive prompt refuses to start
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BootError {
    #[error("no global window")]
    NoWindow,

    #[error("no document")]
    NoDocument,

    /// A required element is missing from the page
    #[error("required element #{0} not found")]
    MissingElement(String),
}

/// Configuration could not be used
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("could not parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("could not read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
