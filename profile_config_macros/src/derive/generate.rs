//! Code generation for `#[derive(Profile)]`.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::parse::{ProfileField, ProfileInput};

/// `FieldMeta` constructor expression for `field`.
fn field_meta(field: &ProfileField, krate: &TokenStream) -> TokenStream {
    let name = &field.name;
    let key = field.key.as_ref().map(|key| quote! { .with_key(#key) });
    let default = field
        .default
        .as_ref()
        .map(|literal| quote! { .with_default(#literal) });
    quote! { #krate::schema::FieldMeta::new(#name) #key #default }
}

fn descriptor(field: &ProfileField, krate: &TokenStream) -> TokenStream {
    let meta = field_meta(field, krate);
    if field.is_skipped() {
        return quote! { #krate::schema::FieldDescriptor::skipped(#meta) };
    }
    let ty = &field.ty;
    quote! {
        #krate::schema::FieldDescriptor::new(#meta, <#ty as #krate::schema::Bind>::kind())
    }
}

/// Generate the `Profile` and `Bind` implementations for `input`.
///
/// Skipped fields appear in `fields()` but not in `walk`, so their types
/// need not implement `Bind`.
pub(crate) fn profile_impls(input: &ProfileInput, krate: &TokenStream) -> TokenStream {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let bound: Vec<_> = input.fields.iter().filter(|f| !f.is_skipped()).collect();
    let walker = if bound.is_empty() {
        format_ident!("_walker")
    } else {
        format_ident!("walker")
    };
    let steps = bound.iter().map(|field| {
        let meta = field_meta(field, krate);
        let member = &field.ident;
        quote! { #walker.field(#meta, &mut self.#member)?; }
    });
    let descriptors = input.fields.iter().map(|field| descriptor(field, krate));

    quote! {
        #[automatically_derived]
        impl #impl_generics #krate::schema::Profile for #ident #ty_generics #where_clause {
            fn walk(
                &mut self,
                #walker: &mut #krate::Walker<'_>,
            ) -> #krate::ProfileResult<()> {
                #( #steps )*
                ::core::result::Result::Ok(())
            }

            fn fields() -> ::std::vec::Vec<#krate::schema::FieldDescriptor> {
                ::std::vec![ #( #descriptors ),* ]
            }
        }

        #[automatically_derived]
        impl #impl_generics #krate::schema::Bind for #ident #ty_generics #where_clause {
            fn kind() -> #krate::schema::FieldKind {
                #krate::schema::FieldKind::Composite(
                    <Self as #krate::schema::Profile>::fields(),
                )
            }

            fn bind(
                &mut self,
                walker: &mut #krate::Walker<'_>,
                path: &str,
                _default: ::core::option::Option<&str>,
            ) -> #krate::ProfileResult<()> {
                #krate::schema::bind_composite(self, walker, path)
            }
        }
    }
}
