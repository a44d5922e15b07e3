//! Shared error types for the evaluation pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for untangling evaluation operations
#[derive(Debug, Error)]
pub enum Error {
    /// An upstream artifact (graph or results CSV) does not exist.
    ///
    /// This is the expected outcome when the untangling tool reported a
    /// single group and therefore emitted no graph.
    #[error("Missing artifact: {}", path.display())]
    MissingArtifact { path: PathBuf },

    /// Source language without a known line offset
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Change color other than the added/removed markers
    #[error("Color {color} not supported (node {node})")]
    UnsupportedColor { node: String, color: String },

    /// Node label without a leading `<group>:` prefix
    #[error("Malformed label on node {node}: {label:?} has no numeric group prefix")]
    MalformedLabel { node: String, label: String },

    /// Attribute required for flattening is absent
    #[error("Attribute '{attribute}' not found in node {node}")]
    MissingAttribute {
        node: String,
        attribute: &'static str,
    },

    /// Ground-truth community that is not an integer
    #[error("Invalid community {value:?} on node {node}")]
    InvalidCommunity { node: String, value: String },

    /// Graph description could not be parsed
    #[error("DOT syntax error at line {line}: {message}")]
    DotSyntax { line: usize, message: String },

    /// Unified diff could not be parsed
    #[error("Diff parse error at line {line}: {message}")]
    DiffSyntax { line: usize, message: String },

    /// Results table could not be parsed
    #[error("Malformed CSV at record {record}: {message}")]
    MalformedCsv { record: usize, message: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn missing_artifact(path: impl Into<PathBuf>) -> Self {
        Self::MissingArtifact { path: path.into() }
    }

    pub fn dot_syntax(line: usize, message: impl Into<String>) -> Self {
        Self::DotSyntax {
            line,
            message: message.into(),
        }
    }

    pub fn malformed_csv(record: usize, message: impl Into<String>) -> Self {
        Self::MalformedCsv {
            record,
            message: message.into(),
        }
    }

    /// True for the "tool found only one group" condition.
    pub fn is_missing_artifact(&self) -> bool {
        matches!(self, Self::MissingArtifact { .. })
    }

    /// Short category name used when reporting batch failures.
    pub fn category(&self) -> &'static str {
        match self {
            Self::MissingArtifact { .. } => "Missing artifact",
            Self::UnsupportedLanguage(_) | Self::UnsupportedColor { .. } => {
                "Unsupported attribute value"
            }
            Self::MalformedLabel { .. }
            | Self::MissingAttribute { .. }
            | Self::InvalidCommunity { .. } => "Malformed node",
            Self::DotSyntax { .. } | Self::DiffSyntax { .. } | Self::MalformedCsv { .. } => {
                "Parse error"
            }
            Self::Configuration(_) => "Configuration",
            Self::Io(_) => "I/O",
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
