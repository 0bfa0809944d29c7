//! Schema descriptors and the traits that connect Rust types to them.
//!
//! Each field of a profile is described by a [`FieldMeta`] (name, optional
//! key override, optional default literal) and a [`FieldKind`] derived from
//! its Rust type through [`Bind::kind`]. The walker interprets the metadata,
//! the resolver interprets the kind.

mod bind;
mod descriptor;

pub use bind::{Bind, Profile, bind_composite};
pub use descriptor::{FieldDescriptor, FieldKind, FieldMeta, SKIP_MARKER, starter_lower};

/// Every dotted leaf path of `T`, in walk order.
///
/// Skipped fields and their subtrees are omitted. Paths are relative to the
/// active profile.
///
/// # Examples
///
/// ```
/// use profile_config::Profile;
/// use profile_config::schema::leaf_paths;
///
/// #[derive(Default, Profile)]
/// struct Eureka {
///     zone: String,
///     #[profile(key = "fetchInterval")]
///     fetch_interval: u32,
/// }
///
/// #[derive(Default, Profile)]
/// struct App {
///     eureka: Eureka,
///     #[profile(skip)]
///     scratch: Vec<u8>,
/// }
///
/// assert_eq!(leaf_paths::<App>(), ["eureka.zone", "eureka.fetchInterval"]);
/// ```
#[must_use]
pub fn leaf_paths<T: Profile>() -> Vec<String> {
    let mut paths = Vec::new();
    collect_paths(&T::fields(), "", &mut paths);
    paths
}

fn collect_paths(fields: &[FieldDescriptor], prefix: &str, out: &mut Vec<String>) {
    for field in fields {
        if field.is_skipped() {
            continue;
        }
        let path = format!("{prefix}{}", field.meta.key_segment());
        match &field.kind {
            FieldKind::Composite(children) => collect_paths(children, &format!("{path}."), out),
            _ => out.push(path),
        }
    }
}
