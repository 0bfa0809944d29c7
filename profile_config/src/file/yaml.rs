//! YAML provider backed by `serde-saphyr`.

use std::collections::BTreeMap;

use camino::Utf8PathBuf;
use figment::{
    Metadata, Profile, Provider,
    error::Kind,
    value::{Dict, Value},
};
use serde_saphyr::Options;

/// Figment provider over an in-memory YAML document.
///
/// Booleans follow YAML 1.2: only `true` and `false` are booleans, so
/// `zone: no` stays the string `"no"`.
#[derive(Debug, Clone)]
pub struct SaphyrYaml {
    path: Utf8PathBuf,
    contents: String,
}

impl SaphyrYaml {
    /// Provider for `contents`, reported as coming from `path`.
    #[must_use]
    pub fn string<P, S>(path: P, contents: S) -> Self
    where
        P: Into<Utf8PathBuf>,
        S: Into<String>,
    {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    fn parse_value(contents: &str) -> Result<Value, serde_saphyr::Error> {
        serde_saphyr::from_str_with_options(
            contents,
            Options {
                strict_booleans: true,
                ..Options::default()
            },
        )
    }
}

impl Provider for SaphyrYaml {
    fn metadata(&self) -> Metadata {
        Metadata::from("Saphyr YAML", self.path.as_std_path())
    }

    fn data(&self) -> Result<BTreeMap<Profile, Dict>, figment::Error> {
        let value = Self::parse_value(&self.contents).map_err(|err| {
            figment::Error::from(Kind::Message(format!("failed to parse {}: {err}", self.path)))
        })?;
        let actual = value.to_actual();
        let dict = value
            .into_dict()
            .ok_or_else(|| figment::Error::from(Kind::InvalidType(actual, "map".into())))?;
        Ok(Profile::Default.collect(dict))
    }
}
