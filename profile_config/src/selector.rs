//! Active-profile selection.
//!
//! A document may hold several profiles side by side:
//!
//! ```yaml
//! profiles:
//!   active: dev
//! dev:
//!   eureka:
//!     zone: A
//! production:
//!   eureka:
//!     zone: B
//! ```
//!
//! The profile name is read through the whole layered store, so
//! `PROFILES_ACTIVE=production` or `--profiles-active production` switch
//! profiles without editing the document.

use crate::store::LayeredStore;
use crate::{ProfileError, ProfileResult};

/// Key holding the active profile name unless configured otherwise.
pub const DEFAULT_PROFILE_KEY: &str = "profiles.active";

/// Narrow `store` to the profile named at `key`.
///
/// When `key` resolves to a non-empty name the returned store is scoped to
/// that sub-tree. When it does not resolve, the store is returned as-is.
///
/// # Errors
///
/// Returns [`ProfileError::ProfileNotFound`] when the name does not match a
/// mapping in the document.
pub fn select_profile(store: &LayeredStore, key: &str) -> ProfileResult<LayeredStore> {
    let Some(name) = store
        .get_string(key)
        .filter(|name| !name.trim().is_empty())
    else {
        tracing::debug!(key, "no active profile, binding from the document root");
        return Ok(store.clone());
    };
    match store.focus(&name) {
        Some(scoped) => {
            tracing::info!(profile = %name, key, "selected active profile");
            Ok(scoped)
        }
        None => Err(ProfileError::profile_not_found(key, name)),
    }
}
