//! Layered configuration profiles.
//!
//! A profile is a plain struct bound field by field from a layered store: a
//! YAML, TOML or JSON document, overlaid by environment variables and
//! command-line flags. Each field may declare a key override and a default
//! literal; the field's Rust type decides how raw values are coerced.
//!
//! ```rust,no_run
//! use profile_config::{Profile, bind_profile};
//!
//! #[derive(Debug, Default, Profile)]
//! struct DataSource {
//!     #[profile(default = "localhost")]
//!     host: String,
//!     #[profile(default = "5432")]
//!     port: u16,
//! }
//!
//! #[derive(Debug, Default, Profile)]
//! #[profile(rename_all = "camelCase")]
//! struct Settings {
//!     data_source: DataSource,
//!     #[profile(skip)]
//!     scratch: Vec<u8>,
//! }
//!
//! # fn main() -> profile_config::ProfileResult<()> {
//! let mut settings = Settings::default();
//! bind_profile(&mut settings, "application.yml", true)?;
//! println!("{settings:?}");
//! # Ok(())
//! # }
//! ```
//!
//! The derive macro lives in the companion `profile_config_macros` crate.

extern crate self as profile_config;

pub use profile_config_macros::Profile;

mod error;
pub mod file;
mod loader;
pub mod resolver;
pub mod schema;
mod selector;
pub mod store;
mod walker;

pub use error::{ProfileError, ProfileResult};
pub use loader::{ProfileLoader, bind_profile};
pub use schema::{Bind, Profile};
pub use selector::{DEFAULT_PROFILE_KEY, select_profile};
pub use store::{EnvLayer, FlagLayer, LayeredStore, Precedence, Source};
pub use walker::{BindReport, ResolvedField, Walker};

/// Normalize a prefix by trimming trailing underscores and converting
/// to lowercase ASCII.
#[must_use]
pub fn normalize_prefix(prefix: &str) -> String {
    prefix.trim_end_matches('_').to_ascii_lowercase()
}

/// Bind `target` from `store` as it stands, without profile selection.
///
/// Fields are visited depth-first in declaration order. The first failure
/// aborts the bind; fields written before it keep their new values.
///
/// # Errors
///
/// Returns the first [`ProfileError`] raised while resolving a field.
///
/// # Examples
///
/// ```
/// use profile_config::{EnvLayer, LayeredStore, Profile, Source, bind};
///
/// #[derive(Default, Profile)]
/// struct Eureka {
///     #[profile(default = "A")]
///     zone: String,
/// }
///
/// let store = LayeredStore::default().with_env(EnvLayer::new().with("ZONE", "B"));
/// let mut eureka = Eureka::default();
/// let report = bind(&store, &mut eureka).expect("zone resolves");
/// assert_eq!(eureka.zone, "B");
/// assert_eq!(report.source_of("zone"), Some(Source::Environment));
/// ```
pub fn bind<T: Profile>(store: &LayeredStore, target: &mut T) -> ProfileResult<BindReport> {
    let mut walker = Walker::new(store);
    target.walk(&mut walker)?;
    Ok(walker.into_report())
}
