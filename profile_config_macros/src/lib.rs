//! Procedural macros for `profile_config`.
//!
//! `#[derive(Profile)]` implements `profile_config::schema::Profile` and
//! `profile_config::schema::Bind` for a struct with named fields, so the
//! struct can be bound on its own or nested inside another profile.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `profile_config::Profile`.
///
/// Field attributes, written `#[profile(...)]`:
///
/// - `key = "..."` overrides the key segment. It may contain dots, and
///   `"_"` excludes the field.
/// - `default = ...` declares the default literal. Strings are used as
///   written; integer, float and boolean literals are accepted as a
///   shorthand for their text.
/// - `skip` excludes the field and its subtree from binding.
///
/// Container attributes:
///
/// - `rename_all = "..."` derives key segments from field names using a
///   serde-style case rule such as `"camelCase"` or `"kebab-case"`.
/// - `crate = "..."` names the `profile_config` crate when it is renamed
///   in `Cargo.toml`.
///
/// Without a key override or `rename_all`, a field's key is its name with
/// the first character lowercased.
#[proc_macro_derive(Profile, attributes(profile))]
pub fn derive_profile(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
