#![forbid(unsafe_code)]

use thiserror::Error;

/// Fatal per-section failures. Non-fatal findings are
/// [`LayoutIssue`](tessera_layout::LayoutIssue) data, never errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("section `{section_id}` is in free mode but has no logicalSize")]
    MissingLogicalSize { section_id: String },

    #[error(
        "section `{section_id}`: locators `{first}` and `{second}` share zIndex {z_index}"
    )]
    DuplicateZIndex {
        section_id: String,
        z_index: i32,
        first: String,
        second: String,
    },
}

impl LayoutError {
    /// The section that failed.
    #[must_use]
    pub fn section_id(&self) -> &str {
        match self {
            Self::MissingLogicalSize { section_id } | Self::DuplicateZIndex { section_id, .. } => {
                section_id
            }
        }
    }
}

/// Failures while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

impl ConfigError {
    /// Turn a non-empty list of validation problems into an error.
    pub fn check(problems: Vec<String>) -> Result<(), Self> {
        if problems.is_empty() {
            Ok(())
        } else {
            Err(Self::Invalid(problems))
        }
    }
}
