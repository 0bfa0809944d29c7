//! Format selection for configuration documents.

use camino::Utf8Path;
use figment::{
    Figment,
    providers::{Format, Json, Toml},
    value::Dict,
};

use crate::{ProfileError, ProfileResult};

#[cfg(feature = "yaml")]
use super::yaml::SaphyrYaml;

/// Parse `data` into a document tree, choosing the format from the
/// extension of `path`.
///
/// `.yaml` and `.yml` are YAML (requires the `yaml` feature), `.json` is
/// JSON, and anything else is read as TOML. A blank document is an empty
/// tree whatever its format.
///
/// # Errors
///
/// Returns [`ProfileError::StoreLoad`] when the data is malformed, when
/// its root is not a mapping, or when the format's feature is disabled.
pub fn parse_document(path: &Utf8Path, data: &str) -> ProfileResult<Dict> {
    if data.trim().is_empty() {
        return Ok(Dict::new());
    }
    let ext = path.extension().map(str::to_ascii_lowercase);
    let figment = match ext.as_deref() {
        Some("yaml" | "yml") => {
            #[cfg(feature = "yaml")]
            {
                Figment::from(SaphyrYaml::string(path, data))
            }
            #[cfg(not(feature = "yaml"))]
            {
                return Err(ProfileError::store_load(
                    path,
                    std::io::Error::other(
                        "yaml feature disabled: enable the 'yaml' feature to read this document",
                    ),
                ));
            }
        }
        Some("json") => Figment::from(Json::string(data)),
        _ => Figment::from(Toml::string(data)),
    };
    figment
        .extract::<Dict>()
        .map_err(|err| ProfileError::store_load(path, err))
}
