//! Parsing of `#[profile(...)]` attributes.
//!
//! Unknown keys are rejected, so a misspelt `default` fails at compile time
//! instead of surfacing as a missing default when the profile is bound.

use syn::meta::ParseNestedMeta;
use syn::{Attribute, Generics, Ident, Type};

mod input;
mod literals;
mod rename;

pub(crate) use input::parse_input;
use literals::{lit_default, lit_str};
pub(crate) use rename::RenameAll;

/// Key segment that excludes a field from binding.
pub(crate) const SKIP_MARKER: &str = "_";

/// Container attributes.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    pub rename_all: Option<RenameAll>,
    /// Overrides the generated crate path for dependency aliasing.
    ///
    /// When set via `#[profile(crate = "my_alias")]`, generated code
    /// references types through `my_alias::` instead of `::profile_config::`.
    pub crate_path: Option<syn::Path>,
}

/// Field attributes.
#[derive(Default, Clone)]
pub(crate) struct FieldAttrs {
    pub key: Option<String>,
    pub default: Option<String>,
    pub skip: bool,
}

/// One named field with its attributes resolved.
pub(crate) struct ProfileField {
    pub ident: Ident,
    pub ty: Type,
    /// Field name without any raw-identifier prefix.
    pub name: String,
    /// Key segment the generated metadata overrides the name with, if any.
    pub key: Option<String>,
    pub default: Option<String>,
}

impl ProfileField {
    pub(crate) fn is_skipped(&self) -> bool {
        self.key.as_deref() == Some(SKIP_MARKER)
    }
}

/// A struct accepted by the derive.
pub(crate) struct ProfileInput {
    pub ident: Ident,
    pub generics: Generics,
    pub attrs: StructAttrs,
    pub fields: Vec<ProfileField>,
}

/// Iterate all `#[profile(...)]` attributes once and apply a callback.
fn parse_profile<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("profile")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

fn unknown(meta: &ParseNestedMeta, expected: &str) -> syn::Error {
    let name = meta
        .path
        .get_ident()
        .map_or_else(|| "attribute".to_owned(), ToString::to_string);
    meta.error(format!("unknown profile attribute `{name}`; expected {expected}"))
}

fn set_once<T>(
    slot: &mut Option<T>,
    value: T,
    meta: &ParseNestedMeta,
    key: &str,
) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error(format!("duplicate `{key}` attribute")));
    }
    *slot = Some(value);
    Ok(())
}

/// Extracts `#[profile(...)]` metadata applied to a struct.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_profile(attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("rename_all") => {
                let rule = RenameAll::parse(&lit_str(meta, "rename_all")?)?;
                set_once(&mut out.rename_all, rule, meta, "rename_all")
            }
            Some("crate") => {
                let s = lit_str(meta, "crate")?;
                let path: syn::Path =
                    syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
                set_once(&mut out.crate_path, path, meta, "crate")
            }
            _ => Err(unknown(meta, "`rename_all` or `crate`")),
        }
    })?;
    Ok(out)
}

/// Extracts `#[profile(...)]` metadata applied to a field.
pub(crate) fn parse_field_attrs(field: &syn::Field) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_profile(&field.attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("key") => {
                let s = lit_str(meta, "key")?;
                if s.value().is_empty() {
                    return Err(syn::Error::new(s.span(), "key must not be empty"));
                }
                set_once(&mut out.key, s.value(), meta, "key")
            }
            Some("default") => {
                let literal = lit_default(meta, "default")?;
                set_once(&mut out.default, literal, meta, "default")
            }
            Some("skip") => {
                if out.skip {
                    return Err(meta.error("duplicate `skip` attribute"));
                }
                out.skip = true;
                Ok(())
            }
            _ => Err(unknown(meta, "`key`, `default` or `skip`")),
        }
    })?;
    if out.skip && (out.key.is_some() || out.default.is_some()) {
        return Err(syn::Error::new_spanned(
            field,
            "`skip` cannot be combined with `key` or `default`",
        ));
    }
    Ok(out)
}
