//! Primary error enum for profile binding flows.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type ProfileResult<T> = Result<T, ProfileError>;

/// Errors that can occur while loading a document or binding a profile.
///
/// Every failure aborts the bind at the point of occurrence. Leaf-level
/// variants carry the dotted path that triggered them; see
/// [`ProfileError::path`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProfileError {
    /// The configuration document could not be read or parsed.
    #[error("Configuration document error in '{path}': {source}")]
    StoreLoad {
        /// Path of the document that failed to load.
        path: Utf8PathBuf,
        /// Underlying I/O or parser error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The active profile names a sub-tree that does not exist.
    #[error("active profile '{profile}' (from '{key}') does not name a section of the document")]
    ProfileNotFound {
        /// Key the profile name was read from.
        key: String,
        /// Profile name that could not be found.
        profile: String,
    },

    /// No layer supplied a value and the field declares no default.
    #[error("no value found for '{path}' and no default declared")]
    MissingDefault {
        /// Dotted path of the failing field.
        path: String,
    },

    /// The declared default literal is malformed for the field's kind.
    #[error("invalid default for '{path}': {literal:?} ({reason})")]
    DefaultParse {
        /// Dotted path of the failing field.
        path: String,
        /// Default literal as declared on the field.
        literal: String,
        /// Why the literal was rejected.
        reason: String,
    },

    /// The field's kind has no coercion rule.
    #[error("unsupported field kind for '{path}': {kind}")]
    UnsupportedKind {
        /// Dotted path of the failing field.
        path: String,
        /// Description of the offending kind.
        kind: String,
    },

    /// A coerced value could not be written into the field's type.
    #[error("failed to assign '{path}': {source}")]
    Assign {
        /// Dotted path of the failing field.
        path: String,
        /// Deserialisation error raised by the assignment.
        #[source]
        source: Box<figment::Error>,
    },
}

impl ProfileError {
    /// Dotted path of the field that triggered the error, when the error
    /// originates from a single field.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::MissingDefault { path }
            | Self::DefaultParse { path, .. }
            | Self::UnsupportedKind { path, .. }
            | Self::Assign { path, .. } => Some(path),
            Self::StoreLoad { .. } | Self::ProfileNotFound { .. } => None,
        }
    }
}
