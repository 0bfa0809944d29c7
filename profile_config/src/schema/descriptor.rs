//! Field metadata and the tagged kind interpreted by the resolver.

use std::borrow::Cow;
use std::fmt;

/// Key segment that excludes a field, and its subtree, from binding.
pub const SKIP_MARKER: &str = "_";

/// Lowercase the first character of `name` when it is an ASCII capital.
///
/// # Examples
///
/// ```
/// use profile_config::schema::starter_lower;
/// assert_eq!(starter_lower("FetchInterval"), "fetchInterval");
/// assert_eq!(starter_lower("zone"), "zone");
/// assert_eq!(starter_lower(""), "");
/// ```
#[must_use]
pub fn starter_lower(name: &str) -> Cow<'_, str> {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {
            Cow::Owned(format!("{}{}", first.to_ascii_lowercase(), chars.as_str()))
        }
        _ => Cow::Borrowed(name),
    }
}

/// Declared metadata for one schema field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldMeta {
    name: &'static str,
    key: Option<&'static str>,
    default: Option<&'static str>,
}

impl FieldMeta {
    /// Metadata for the field called `name`, without overrides.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            key: None,
            default: None,
        }
    }

    /// Override the key segment. The segment may itself contain dots.
    #[must_use]
    pub const fn with_key(mut self, key: &'static str) -> Self {
        self.key = Some(key);
        self
    }

    /// Declare a default literal, parsed only when no layer has a value.
    #[must_use]
    pub const fn with_default(mut self, literal: &'static str) -> Self {
        self.default = Some(literal);
        self
    }

    /// Mark the field as skipped.
    #[must_use]
    pub const fn skipped(self) -> Self {
        self.with_key(SKIP_MARKER)
    }

    /// Field name as declared in the schema.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Explicit key override, if any.
    #[must_use]
    pub const fn key(&self) -> Option<&'static str> {
        self.key
    }

    /// Default literal, if any.
    #[must_use]
    pub const fn default_literal(&self) -> Option<&'static str> {
        self.default
    }

    /// Key segment used in dotted paths: the override when present, else the
    /// name with its first character lowercased.
    #[must_use]
    pub fn key_segment(&self) -> Cow<'static, str> {
        self.key.map_or_else(|| starter_lower(self.name), Cow::Borrowed)
    }

    /// Whether the key segment is the skip marker.
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        self.key_segment() == SKIP_MARKER
    }
}

/// A field and its kind.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDescriptor {
    /// Declared metadata.
    pub meta: FieldMeta,
    /// Kind derived from the field's type.
    pub kind: FieldKind,
}

impl FieldDescriptor {
    /// Describe a bound field.
    #[must_use]
    pub const fn new(meta: FieldMeta, kind: FieldKind) -> Self {
        Self { meta, kind }
    }

    /// Describe a field excluded from binding.
    #[must_use]
    pub const fn skipped(meta: FieldMeta) -> Self {
        Self {
            meta,
            kind: FieldKind::Skip,
        }
    }

    /// Whether the walker ignores this field.
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self.kind, FieldKind::Skip) || self.meta.is_skipped()
    }
}

/// Type-directed shape of a field.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum FieldKind {
    /// `true` / `false`.
    Bool,
    /// UTF-8 text.
    String,
    /// Integer of a fixed width.
    Int {
        /// Width in bits, between 1 and 64.
        bits: u32,
        /// Whether negative values are allowed.
        signed: bool,
    },
    /// IEEE float of width 32 or 64.
    Float {
        /// Width in bits.
        bits: u32,
    },
    /// List whose elements share one kind.
    Sequence(Box<FieldKind>),
    /// String-keyed map whose values share one kind.
    Mapping(Box<FieldKind>),
    /// Any dynamically typed value.
    Any,
    /// Nested schema, walked field by field.
    Composite(Vec<FieldDescriptor>),
    /// Excluded from binding.
    Skip,
}

impl FieldKind {
    /// Signed integer kind of `bits` width.
    #[must_use]
    pub const fn signed(bits: u32) -> Self {
        Self::Int { bits, signed: true }
    }

    /// Unsigned integer kind of `bits` width.
    #[must_use]
    pub const fn unsigned(bits: u32) -> Self {
        Self::Int {
            bits,
            signed: false,
        }
    }

    /// Sequence of `element`.
    #[must_use]
    pub fn sequence(element: Self) -> Self {
        Self::Sequence(Box::new(element))
    }

    /// Mapping to `value`.
    #[must_use]
    pub fn mapping(value: Self) -> Self {
        Self::Mapping(Box::new(value))
    }

    /// Describe why a leaf of this kind cannot be resolved, or `None` when
    /// the resolver has a coercion rule for it.
    #[must_use]
    pub fn unsupported(&self) -> Option<String> {
        match self {
            Self::Bool | Self::String | Self::Any => None,
            Self::Int { bits, .. } if (1..=64).contains(bits) => None,
            Self::Float { bits } if matches!(bits, 32 | 64) => None,
            Self::Int { .. } | Self::Float { .. } | Self::Composite(_) | Self::Skip => {
                Some(self.to_string())
            }
            Self::Sequence(inner) | Self::Mapping(inner) => {
                inner.unsupported().map(|_| self.to_string())
            }
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::String => f.write_str("string"),
            Self::Int { bits, signed: true } => write!(f, "i{bits}"),
            Self::Int {
                bits,
                signed: false,
            } => write!(f, "u{bits}"),
            Self::Float { bits } => write!(f, "f{bits}"),
            Self::Sequence(inner) => write!(f, "sequence of {inner}"),
            Self::Mapping(inner) => write!(f, "mapping of {inner}"),
            Self::Any => f.write_str("any"),
            Self::Composite(_) => f.write_str("composite"),
            Self::Skip => f.write_str("skip"),
        }
    }
}
