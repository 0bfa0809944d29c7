//! Layered configuration store.
//!
//! A [`LayeredStore`] answers dotted-path lookups against a base document
//! overlaid by an [`EnvLayer`] and a [`FlagLayer`]. The two overlays are
//! ordered by a [`Precedence`] fixed at construction, so every lookup made
//! through one store applies the same ordering.
//!
//! Overlay values are kept as the raw strings they were supplied as and are
//! coerced only once the requested kind is known.

mod env;
mod flags;
mod precedence;

use std::fmt;
use std::sync::Arc;

use figment::value::{Dict, Tag, Value};

use crate::resolver::coerce;
use crate::schema::FieldKind;

pub use env::EnvLayer;
pub use flags::FlagLayer;
pub use precedence::Precedence;

#[cfg(test)]
mod tests;

/// Where a resolved value came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Source {
    /// The base configuration document.
    Document,
    /// An environment variable.
    Environment,
    /// A command-line flag.
    Flags,
    /// The field's declared default literal.
    Default,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Document => "document",
            Self::Environment => "environment",
            Self::Flags => "flags",
            Self::Default => "default",
        })
    }
}

/// Uncoerced value found at a path.
#[derive(Clone, Copy, Debug)]
pub enum Entry<'a> {
    /// A value from the parsed document.
    Document(&'a Value),
    /// A raw string from the environment or flags.
    Raw(&'a str),
}

/// A successful, uncoerced lookup.
#[derive(Clone, Copy, Debug)]
pub struct Hit<'a> {
    /// Layer that supplied the entry.
    pub source: Source,
    /// The entry itself.
    pub entry: Entry<'a>,
}

/// A lookup coerced to a requested [`FieldKind`].
#[derive(Clone, Debug, PartialEq)]
pub struct Found {
    /// Layer that supplied the value.
    pub source: Source,
    /// Value normalised to the requested kind.
    pub value: Value,
}

/// Flatten a dotted path into an overlay name: uppercase, with `.` and `-`
/// replaced by `_`.
///
/// # Examples
///
/// ```
/// use profile_config::store::flatten_key;
/// assert_eq!(flatten_key("dev.eureka.zone"), "DEV_EUREKA_ZONE");
/// assert_eq!(flatten_key("log-level"), "LOG_LEVEL");
/// ```
#[must_use]
pub fn flatten_key(path: &str) -> String {
    path.chars()
        .map(|c| match c {
            '.' | '-' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}

/// Read-only view over a document and its overlays.
///
/// Cloning is cheap: the document and layers are shared. A store may be
/// narrowed to a sub-tree with [`LayeredStore::focus`]; overlay names keep
/// using the full path from the document root.
#[derive(Clone, Debug)]
pub struct LayeredStore {
    document: Arc<Value>,
    env: Arc<EnvLayer>,
    flags: Arc<FlagLayer>,
    precedence: Precedence,
    scope: String,
}

impl Default for LayeredStore {
    fn default() -> Self {
        Self::new(Dict::new())
    }
}

impl LayeredStore {
    /// Create a store over `document` with empty overlays.
    #[must_use]
    pub fn new(document: Dict) -> Self {
        Self {
            document: Arc::new(Value::Dict(Tag::Default, document)),
            env: Arc::new(EnvLayer::new()),
            flags: Arc::new(FlagLayer::new()),
            precedence: Precedence::default(),
            scope: String::new(),
        }
    }

    /// Replace the environment overlay.
    #[must_use]
    pub fn with_env(mut self, env: EnvLayer) -> Self {
        self.env = Arc::new(env);
        self
    }

    /// Replace the flag overlay.
    #[must_use]
    pub fn with_flags(mut self, flags: FlagLayer) -> Self {
        self.flags = Arc::new(flags);
        self
    }

    /// Set the ordering between the overlays.
    #[must_use]
    pub const fn with_precedence(mut self, precedence: Precedence) -> Self {
        self.precedence = precedence;
        self
    }

    /// Ordering between the overlays.
    #[must_use]
    pub const fn precedence(&self) -> Precedence {
        self.precedence
    }

    /// Dotted path of the sub-tree this store is narrowed to, if any.
    #[must_use]
    pub fn scope(&self) -> Option<&str> {
        Some(self.scope.as_str()).filter(|scope| !scope.is_empty())
    }

    /// Path from the document root for a path relative to this store.
    #[must_use]
    pub fn full_path(&self, path: &str) -> String {
        if self.scope.is_empty() {
            path.to_owned()
        } else {
            format!("{}.{path}", self.scope)
        }
    }

    /// Find the uncoerced entry at `path`, consulting the overlays in
    /// precedence order and then the document.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<Hit<'_>> {
        let full = self.full_path(path);
        for source in self.precedence.overlays() {
            let raw = match source {
                Source::Environment => self.env.get(&full),
                Source::Flags => self.flags.get(&full),
                Source::Document | Source::Default => None,
            };
            if let Some(value) = raw {
                return Some(Hit {
                    source,
                    entry: Entry::Raw(value),
                });
            }
        }
        self.document.find_ref(&full).map(|value| Hit {
            source: Source::Document,
            entry: Entry::Document(value),
        })
    }

    /// Typed lookup: the entry at `path` coerced to `kind`.
    ///
    /// Returns `None` when the path is absent or when the entry supplied by
    /// the winning layer is incompatible with `kind`. Lower layers are not
    /// consulted in the latter case.
    #[must_use]
    pub fn get(&self, path: &str, kind: &FieldKind) -> Option<Found> {
        let hit = self.lookup(path)?;
        match coerce::from_entry(hit.entry, kind) {
            Ok(value) => Some(Found {
                source: hit.source,
                value,
            }),
            Err(reason) => {
                tracing::debug!(
                    path = %self.full_path(path),
                    source = %hit.source,
                    %reason,
                    "stored value is incompatible with the field kind"
                );
                None
            }
        }
    }

    /// Typed lookup of a string.
    #[must_use]
    pub fn get_string(&self, path: &str) -> Option<String> {
        match self.get(path, &FieldKind::String)?.value {
            Value::String(_, value) => Some(value),
            _ => None,
        }
    }

    /// Narrow the store to the mapping at `name`.
    ///
    /// Returns `None` when the document holds no mapping at that path.
    #[must_use]
    pub fn focus(&self, name: &str) -> Option<Self> {
        let full = self.full_path(name);
        match self.document.find_ref(&full) {
            Some(Value::Dict(..)) => Some(Self {
                scope: full,
                ..self.clone()
            }),
            _ => None,
        }
    }
}
