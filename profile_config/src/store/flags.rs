//! Command-line flag overlay.
//!
//! Flags use the same flattening as environment variables, so
//! `--dev-eureka-zone`, `--dev.eureka.zone` and `--DEV_EUREKA_ZONE` all
//! address `dev.eureka.zone`. Accepted shapes:
//!
//! - `--name=value` and `--name value`;
//! - a bare `--name` (or one followed by another flag) means `true`;
//! - tokens without a leading dash are positional and ignored;
//! - `--` ends flag parsing.
//!
//! A value that itself starts with `-` must use the `--name=value` form.

use std::collections::BTreeMap;

use uncased::{Uncased, UncasedStr};

use super::flatten_key;

const BARE_FLAG_VALUE: &str = "true";

/// Parsed command-line flags used as an overlay.
#[derive(Clone, Debug, Default)]
pub struct FlagLayer {
    flags: BTreeMap<Uncased<'static>, String>,
}

impl FlagLayer {
    /// Create an empty layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the arguments of the current process, skipping the binary name.
    #[must_use]
    pub fn from_process() -> Self {
        Self::parse(std::env::args().skip(1))
    }

    /// Parse flags from `args`. Later occurrences of a flag replace earlier
    /// ones.
    ///
    /// # Examples
    ///
    /// ```
    /// use profile_config::FlagLayer;
    /// let flags = FlagLayer::parse(["--eureka-zone", "B", "--verbose", "--port=8080"]);
    /// assert_eq!(flags.get("eureka.zone"), Some("B"));
    /// assert_eq!(flags.get("verbose"), Some("true"));
    /// assert_eq!(flags.get("port"), Some("8080"));
    /// ```
    #[must_use]
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut layer = Self::new();
        let mut tokens = args.into_iter().peekable();
        while let Some(token) = tokens.next() {
            let current = token.as_ref();
            if current == "--" {
                break;
            }
            let Some(name) = flag_name(current) else {
                continue;
            };
            if let Some((key, value)) = name.split_once('=') {
                layer.insert(key, value);
                continue;
            }
            let value = tokens
                .next_if(|next| !next.as_ref().starts_with('-'))
                .map_or_else(|| BARE_FLAG_VALUE.to_owned(), |next| next.as_ref().to_owned());
            layer.insert(name, value);
        }
        layer
    }

    /// Add or replace a flag, returning the layer for chaining.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add or replace a flag. `name` may be given in any flattening.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.flags.insert(Uncased::from(flatten_key(name)), value.into());
    }

    /// Raw value overriding `path`, if any.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        let key = flatten_key(path);
        self.flags.get(UncasedStr::new(&key)).map(String::as_str)
    }

    /// Number of parsed flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Whether no flags were parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

fn flag_name(token: &str) -> Option<&str> {
    token
        .strip_prefix("--")
        .or_else(|| token.strip_prefix('-'))
        .filter(|name| !name.is_empty() && !name.starts_with('='))
}
