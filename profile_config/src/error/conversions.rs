//! Conversions between `ProfileError` and `figment::Error`.

use figment::Error as FigmentError;

use super::ProfileError;

impl From<ProfileError> for FigmentError {
    /// Allow using `?` inside `figment::Jail` closures.
    fn from(e: ProfileError) -> Self {
        match e {
            ProfileError::Assign { source, .. } => *source,
            other => Self::from(other.to_string()),
        }
    }
}
