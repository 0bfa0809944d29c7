//! Constructors for `ProfileError`.

use camino::Utf8Path;

use super::ProfileError;

impl ProfileError {
    /// Construct a [`ProfileError::StoreLoad`] for a document path.
    #[must_use]
    pub fn store_load(
        path: &Utf8Path,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::StoreLoad {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }

    /// Construct a [`ProfileError::MissingDefault`].
    ///
    /// # Examples
    ///
    /// ```
    /// use profile_config::ProfileError;
    /// let err = ProfileError::missing_default("database.host");
    /// assert_eq!(err.path(), Some("database.host"));
    /// ```
    #[must_use]
    pub fn missing_default(path: impl Into<String>) -> Self {
        Self::MissingDefault { path: path.into() }
    }

    /// Construct a [`ProfileError::DefaultParse`].
    #[must_use]
    pub fn default_parse(
        path: impl Into<String>,
        literal: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::DefaultParse {
            path: path.into(),
            literal: literal.into(),
            reason: reason.into(),
        }
    }

    /// Construct a [`ProfileError::UnsupportedKind`].
    #[must_use]
    pub fn unsupported_kind(path: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::UnsupportedKind {
            path: path.into(),
            kind: kind.into(),
        }
    }

    /// Construct a [`ProfileError::Assign`] from a [`figment::Error`].
    #[must_use]
    pub fn assign(path: impl Into<String>, source: figment::Error) -> Self {
        Self::Assign {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Construct a [`ProfileError::ProfileNotFound`].
    #[must_use]
    pub fn profile_not_found(key: impl Into<String>, profile: impl Into<String>) -> Self {
        Self::ProfileNotFound {
            key: key.into(),
            profile: profile.into(),
        }
    }
}
