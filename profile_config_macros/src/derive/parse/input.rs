//! Input parsing for the `Profile` derive macro.
//!
//! Gathers the struct identifier, generics, fields and attribute metadata
//! in one pass so expansion can fail fast with useful errors.

use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields};

use super::{ProfileField, ProfileInput, SKIP_MARKER, parse_field_attrs, parse_struct_attrs};

/// Validate `input` and resolve every field's key segment.
///
/// A field's key is, in order: the skip marker when `skip` is set, its
/// explicit `key`, or its name under the container's `rename_all` rule.
/// Fields with none of these are left to the runtime default of lowering
/// the first character.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<ProfileInput> {
    let attrs = parse_struct_attrs(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Profile requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Profile can only be derived for structs",
            ));
        }
    };

    let mut fields = Vec::with_capacity(named.len());
    for field in named {
        let Some(ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "Profile requires named fields"));
        };
        let field_attrs = parse_field_attrs(field)?;
        let name = ident.unraw().to_string();
        let key = if field_attrs.skip {
            Some(SKIP_MARKER.to_owned())
        } else {
            field_attrs
                .key
                .or_else(|| attrs.rename_all.map(|rule| rule.apply(&name)))
        };
        fields.push(ProfileField {
            ident,
            ty: field.ty.clone(),
            name,
            key,
            default: field_attrs.default,
        });
    }

    Ok(ProfileInput {
        ident: input.ident.clone(),
        generics: input.generics.clone(),
        attrs,
        fields,
    })
}
