//! Literal parsing helpers for derive attributes.

use syn::meta::ParseNestedMeta;
use syn::{Lit, LitStr};

fn parse_lit<T, F>(
    meta: &ParseNestedMeta,
    key: &str,
    expected: &str,
    extractor: F,
) -> syn::Result<T>
where
    F: FnOnce(Lit) -> Option<T>,
{
    let literal = meta.value()?.parse::<Lit>()?;
    let span = literal.span();
    extractor(literal).ok_or_else(|| syn::Error::new(span, format!("{key} must be a {expected}")))
}

/// Parses a string literal from an attribute.
pub(crate) fn lit_str(meta: &ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    parse_lit(meta, key, "string", |lit| match lit {
        Lit::Str(s) => Some(s),
        _ => None,
    })
}

/// Parses a default literal, returning the text the resolver will parse.
///
/// Integer, float and boolean literals are accepted as their source text,
/// so `default = 8080` and `default = "8080"` are equivalent. Type
/// suffixes are dropped.
pub(crate) fn lit_default(meta: &ParseNestedMeta, key: &str) -> syn::Result<String> {
    parse_lit(
        meta,
        key,
        "string, integer, float or boolean literal",
        |lit| match lit {
            Lit::Str(s) => Some(s.value()),
            Lit::Int(i) => Some(i.base10_digits().to_owned()),
            Lit::Float(f) => Some(f.base10_digits().to_owned()),
            Lit::Bool(b) => Some(b.value.to_string()),
            _ => None,
        },
    )
}
