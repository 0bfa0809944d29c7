//! Type-directed resolution of leaf values.
//!
//! A leaf resolves in at most two steps: a typed lookup through the store,
//! then, on a miss, the field's default literal parsed for its kind. The
//! outcome is a [`figment::value::Value`] normalised to the kind, ready to
//! be deserialised into the field's Rust type.

pub(crate) mod coerce;

use figment::value::Value;

use crate::schema::FieldKind;
use crate::store::{LayeredStore, Source};
use crate::{ProfileError, ProfileResult};

/// A resolved leaf value and the layer that supplied it.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolved {
    /// Value normalised to the requested kind.
    pub value: Value,
    /// Layer the value came from.
    pub source: Source,
}

/// Resolves leaves against one store.
#[derive(Clone, Copy, Debug)]
pub struct Resolver<'a> {
    store: &'a LayeredStore,
}

impl<'a> Resolver<'a> {
    /// Create a resolver reading from `store`.
    #[must_use]
    pub const fn new(store: &'a LayeredStore) -> Self {
        Self { store }
    }

    /// Resolve the leaf at `path` as `kind`, falling back to `default`.
    ///
    /// # Errors
    ///
    /// - [`ProfileError::UnsupportedKind`] when `kind` has no coercion rule;
    /// - [`ProfileError::MissingDefault`] when no layer holds a compatible
    ///   value and `default` is `None`;
    /// - [`ProfileError::DefaultParse`] when `default` is malformed or out of
    ///   range for `kind`.
    pub fn resolve(
        &self,
        path: &str,
        kind: &FieldKind,
        default: Option<&str>,
    ) -> ProfileResult<Resolved> {
        if let Some(description) = kind.unsupported() {
            return Err(ProfileError::unsupported_kind(path, description));
        }
        if let Some(found) = self.store.get(path, kind) {
            tracing::debug!(path, source = %found.source, "resolved from store");
            return Ok(Resolved {
                value: found.value,
                source: found.source,
            });
        }
        let Some(literal) = default else {
            return Err(ProfileError::missing_default(path));
        };
        let value = coerce::parse_default(literal, kind)
            .map_err(|reason| ProfileError::default_parse(path, literal, reason))?;
        tracing::debug!(path, literal, "resolved from default");
        Ok(Resolved {
            value,
            source: Source::Default,
        })
    }
}
