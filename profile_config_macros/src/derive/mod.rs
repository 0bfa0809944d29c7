//! Expansion of `#[derive(Profile)]`.

use proc_macro2::TokenStream;
use syn::DeriveInput;

mod crate_path;
mod generate;
mod parse;

/// Parse `input` and generate the trait implementations.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse::parse_input(input)?;
    let krate = crate_path::resolve(parsed.attrs.crate_path.as_ref());
    Ok(generate::profile_impls(&parsed, &krate))
}
