//! Reading configuration documents from disk.

use camino::Utf8Path;
use figment::value::Dict;

use super::parser::parse_document;
use crate::{ProfileError, ProfileResult};

/// Read and parse the document at `path`.
///
/// # Examples
///
/// ```rust,no_run
/// use camino::Utf8Path;
///
/// # fn run() -> profile_config::ProfileResult<()> {
/// let document = profile_config::file::load_document(Utf8Path::new("application.yml"))?;
/// assert!(document.contains_key("profiles"));
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns [`ProfileError::StoreLoad`] when the file cannot be read or does
/// not parse.
pub fn load_document(path: &Utf8Path) -> ProfileResult<Dict> {
    tracing::info!(%path, "loading configuration document");
    let data = std::fs::read_to_string(path).map_err(|err| ProfileError::store_load(path, err))?;
    let document = parse_document(path, &data)?;
    tracing::debug!(%path, keys = document.len(), "parsed configuration document");
    Ok(document)
}
