//! Environment overlay.
//!
//! Variables address dotted paths by flattening: the path is uppercased and
//! separators become underscores, so `dev.eureka.zone` is read from
//! `DEV_EUREKA_ZONE`. Names compare case-insensitively.

use std::collections::BTreeMap;

use figment::providers::Env;
use uncased::{Uncased, UncasedStr};

use super::flatten_key;

/// Snapshot of environment variables used as an overlay.
///
/// The snapshot is taken once; later changes to the process environment
/// are not observed, which keeps binds reproducible.
#[derive(Clone, Debug, Default)]
pub struct EnvLayer {
    vars: BTreeMap<Uncased<'static>, String>,
}

impl EnvLayer {
    /// Create an empty layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture every variable of the current process.
    #[must_use]
    pub fn from_process() -> Self {
        Env::raw()
            .iter()
            .map(|(name, value)| (name.as_str().to_owned(), value))
            .collect()
    }

    /// Capture variables starting with `prefix`, stripping it from the names.
    ///
    /// The prefix is normalised first, so `"APP"`, `"app_"` and `"APP_"` all
    /// select `APP_DATABASE_HOST` as `database.host`.
    #[must_use]
    pub fn prefixed(prefix: &str) -> Self {
        let normalised = format!("{}_", crate::normalize_prefix(prefix));
        Env::prefixed(&normalised)
            .iter()
            .map(|(name, value)| (name.as_str().to_owned(), value))
            .collect()
    }

    /// Add or replace a variable, returning the layer for chaining.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add or replace a variable.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(Uncased::from(name.into()), value.into());
    }

    /// Raw value overriding `path`, if any.
    ///
    /// Empty variables are treated as unset.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        let key = flatten_key(path);
        self.vars
            .get(UncasedStr::new(&key))
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Number of captured variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether no variables were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for EnvLayer
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut layer = Self::new();
        for (name, value) in iter {
            layer.insert(name, value);
        }
        layer
    }
}
