//! Depth-first traversal of a profile schema.
//!
//! The walker owns the current path prefix. Each [`Walker::field`] call
//! derives the field's dotted path from that prefix and its key segment,
//! then hands the field to its [`Bind`] implementation: composites descend
//! through [`Walker::nested`], leaves resolve through [`Walker::leaf`].

use serde::de::DeserializeOwned;

use crate::resolver::Resolver;
use crate::schema::{Bind, FieldMeta, SKIP_MARKER};
use crate::store::{LayeredStore, Source};
use crate::{ProfileError, ProfileResult};

/// A leaf written during a bind, with the layer that supplied it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedField {
    /// Dotted path of the leaf, relative to the active profile.
    pub path: String,
    /// Layer the value came from.
    pub source: Source,
}

/// Leaves written by a bind call, in walk order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BindReport {
    fields: Vec<ResolvedField>,
}

impl BindReport {
    /// Layer that supplied `path`, if the leaf was written.
    #[must_use]
    pub fn source_of(&self, path: &str) -> Option<Source> {
        self.fields
            .iter()
            .find(|field| field.path == path)
            .map(|field| field.source)
    }

    /// Iterate over the written leaves.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedField> {
        self.fields.iter()
    }

    /// Number of written leaves.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no leaf was written.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Traversal state for one bind call.
#[derive(Debug)]
pub struct Walker<'a> {
    resolver: Resolver<'a>,
    prefix: String,
    report: BindReport,
}

impl<'a> Walker<'a> {
    /// Start a walk at the root of `store`.
    #[must_use]
    pub fn new(store: &'a LayeredStore) -> Self {
        Self {
            resolver: Resolver::new(store),
            prefix: String::new(),
            report: BindReport::default(),
        }
    }

    /// Bind one field described by `meta` into `slot`.
    ///
    /// Skipped fields return immediately without touching `slot`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while binding the field or, for
    /// composites, any of its descendants.
    pub fn field<T: Bind>(&mut self, meta: FieldMeta, slot: &mut T) -> ProfileResult<()> {
        let segment = meta.key_segment();
        if segment == SKIP_MARKER {
            tracing::trace!(field = meta.name(), "skipping field");
            return Ok(());
        }
        let path = format!("{}{segment}", self.prefix);
        slot.bind(self, &path, meta.default_literal())
    }

    /// Run `walk` with `path` as the enclosing composite, restoring the
    /// previous prefix afterwards.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `walk`.
    pub fn nested<F>(&mut self, path: &str, walk: F) -> ProfileResult<()>
    where
        F: FnOnce(&mut Self) -> ProfileResult<()>,
    {
        tracing::trace!(path, "descending into composite");
        let outer = std::mem::replace(&mut self.prefix, format!("{path}."));
        let result = walk(self);
        self.prefix = outer;
        result
    }

    /// Resolve the leaf at `path` and write it into `slot`.
    ///
    /// `slot` is only written when resolution succeeds.
    ///
    /// # Errors
    ///
    /// Returns the resolver's error, or [`ProfileError::Assign`] when the
    /// resolved value does not deserialise into `T`.
    pub fn leaf<T>(&mut self, slot: &mut T, path: &str, default: Option<&str>) -> ProfileResult<()>
    where
        T: Bind + DeserializeOwned,
    {
        let resolved = self.resolver.resolve(path, &T::kind(), default)?;
        *slot = resolved
            .value
            .deserialize()
            .map_err(|err| ProfileError::assign(path, err))?;
        self.report.fields.push(ResolvedField {
            path: path.to_owned(),
            source: resolved.source,
        });
        Ok(())
    }

    /// Finish the walk and return what was written.
    #[must_use]
    pub fn into_report(self) -> BindReport {
        self.report
    }
}
