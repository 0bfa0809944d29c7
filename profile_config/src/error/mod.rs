//! Error types produced while loading documents and binding profiles.

mod constructors;
mod conversions;
mod types;

pub use types::{ProfileError, ProfileResult};
