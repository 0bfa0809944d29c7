//! End-to-end binding: read a document, overlay the environment and flags,
//! select the active profile and walk the target schema.

use camino::{Utf8Path, Utf8PathBuf};

use crate::file::load_document;
use crate::schema::Profile;
use crate::selector::{DEFAULT_PROFILE_KEY, select_profile};
use crate::store::{EnvLayer, FlagLayer, LayeredStore, Precedence};
use crate::{BindReport, ProfileResult};

/// Builder describing where a profile is bound from.
///
/// Overlays default to the current process: every environment variable and
/// the process arguments. Replace them with [`ProfileLoader::env`] and
/// [`ProfileLoader::flags`] for hermetic binds.
///
/// # Examples
///
/// ```rust,no_run
/// use profile_config::{EnvLayer, Precedence, Profile, ProfileLoader};
///
/// #[derive(Debug, Default, Profile)]
/// struct Eureka {
///     #[profile(default = "primary")]
///     zone: String,
/// }
///
/// # fn run() -> profile_config::ProfileResult<()> {
/// let eureka: Eureka = ProfileLoader::new("application.yml")
///     .env(EnvLayer::prefixed("APP"))
///     .precedence(Precedence::FlagsOverEnv)
///     .load()?;
/// println!("zone {}", eureka.zone);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct ProfileLoader {
    document: Utf8PathBuf,
    precedence: Precedence,
    env: Option<EnvLayer>,
    flags: Option<FlagLayer>,
    profile_key: Option<String>,
}

impl ProfileLoader {
    /// Bind from the document at `document`.
    #[must_use]
    pub fn new(document: impl Into<Utf8PathBuf>) -> Self {
        Self {
            document: document.into(),
            precedence: Precedence::default(),
            env: None,
            flags: None,
            profile_key: Some(DEFAULT_PROFILE_KEY.to_owned()),
        }
    }

    /// Set the ordering between the environment and flag overlays.
    #[must_use]
    pub const fn precedence(mut self, precedence: Precedence) -> Self {
        self.precedence = precedence;
        self
    }

    /// Boolean form of [`ProfileLoader::precedence`]: `true` lets the
    /// environment override flags.
    #[must_use]
    pub const fn env_higher(self, env_higher: bool) -> Self {
        self.precedence(Precedence::from_env_higher(env_higher))
    }

    /// Use `env` instead of the process environment.
    #[must_use]
    pub fn env(mut self, env: EnvLayer) -> Self {
        self.env = Some(env);
        self
    }

    /// Use `flags` instead of the process arguments.
    #[must_use]
    pub fn flags(mut self, flags: FlagLayer) -> Self {
        self.flags = Some(flags);
        self
    }

    /// Read the active profile name from `key` instead of `profiles.active`.
    #[must_use]
    pub fn profile_key(mut self, key: impl Into<String>) -> Self {
        self.profile_key = Some(key.into());
        self
    }

    /// Always bind from the document root.
    #[must_use]
    pub fn without_profiles(mut self) -> Self {
        self.profile_key = None;
        self
    }

    /// Path of the document this loader reads.
    #[must_use]
    pub fn document(&self) -> &Utf8Path {
        &self.document
    }

    /// Load the document and assemble the layered store, before profile
    /// selection.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::StoreLoad`](crate::ProfileError::StoreLoad)
    /// when the document cannot be read or parsed.
    pub fn store(&self) -> ProfileResult<LayeredStore> {
        let document = load_document(self.document())?;
        let env = self.env.clone().unwrap_or_else(EnvLayer::from_process);
        let flags = self.flags.clone().unwrap_or_else(FlagLayer::from_process);
        tracing::debug!(
            env = env.len(),
            flags = flags.len(),
            precedence = ?self.precedence,
            "assembled layered store"
        );
        Ok(LayeredStore::new(document)
            .with_env(env)
            .with_flags(flags)
            .with_precedence(self.precedence))
    }

    /// Bind `target` field by field, stopping at the first failure.
    ///
    /// Fields bound before a failure keep their new values.
    ///
    /// # Errors
    ///
    /// Returns the first [`ProfileError`](crate::ProfileError) raised while
    /// loading, selecting the profile or resolving a field.
    pub fn bind<T: Profile>(&self, target: &mut T) -> ProfileResult<BindReport> {
        let store = self.store()?;
        let scoped = match &self.profile_key {
            Some(key) => select_profile(&store, key)?,
            None => store,
        };
        let report = crate::bind(&scoped, target)?;
        tracing::info!(
            document = %self.document(),
            profile = scoped.scope().unwrap_or("<root>"),
            fields = report.len(),
            "bound configuration profile"
        );
        Ok(report)
    }

    /// Bind a fresh `T::default()` and return it.
    ///
    /// # Errors
    ///
    /// As for [`ProfileLoader::bind`].
    pub fn load<T: Profile + Default>(&self) -> ProfileResult<T> {
        let mut target = T::default();
        self.bind(&mut target)?;
        Ok(target)
    }
}

/// Bind `target` from the document at `path`, overlaid by the process
/// environment and arguments.
///
/// `env_higher` decides which overlay wins when both supply a value:
/// `true` lets the environment override flags.
///
/// # Errors
///
/// As for [`ProfileLoader::bind`].
pub fn bind_profile<T: Profile>(
    target: &mut T,
    path: impl AsRef<Utf8Path>,
    env_higher: bool,
) -> ProfileResult<BindReport> {
    ProfileLoader::new(path.as_ref())
        .env_higher(env_higher)
        .bind(target)
}
