//! Ordering between the environment and flag layers.

use super::Source;

/// Which overlay wins when both the environment and the flags define a key.
///
/// The base document always sits underneath both overlays.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Precedence {
    /// Environment variables override flags.
    #[default]
    EnvOverFlags,
    /// Flags override environment variables.
    FlagsOverEnv,
}

impl Precedence {
    /// Map the boolean switch used by [`crate::bind_profile`] onto a
    /// precedence: `true` puts the environment on top.
    ///
    /// # Examples
    ///
    /// ```
    /// use profile_config::Precedence;
    /// assert_eq!(Precedence::from_env_higher(true), Precedence::EnvOverFlags);
    /// assert_eq!(Precedence::from_env_higher(false), Precedence::FlagsOverEnv);
    /// ```
    #[must_use]
    pub const fn from_env_higher(env_higher: bool) -> Self {
        if env_higher {
            Self::EnvOverFlags
        } else {
            Self::FlagsOverEnv
        }
    }

    /// Overlay sources in lookup order, highest precedence first.
    #[must_use]
    pub const fn overlays(self) -> [Source; 2] {
        match self {
            Self::EnvOverFlags => [Source::Environment, Source::Flags],
            Self::FlagsOverEnv => [Source::Flags, Source::Environment],
        }
    }
}
