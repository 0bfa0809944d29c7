//! Helpers for running tests inside a `figment::Jail`.
//!
//! A jail gives each test a fresh working directory and restores the process
//! environment afterwards, which is what loader tests need when they read
//! documents from disk and overlays from the real environment.

use anyhow::{Result, anyhow};

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// # Errors
///
/// Returns an error if the jail cannot be set up or the closure returns a
/// [`figment::Error`].
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|j| {
        output = Some(f(j)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Write `contents` to `name` in the jail's directory and return the name.
///
/// # Errors
///
/// Returns the jail's error when the file cannot be created.
pub fn write_document<'a>(
    jail: &mut figment::Jail,
    name: &'a str,
    contents: &str,
) -> figment::error::Result<&'a str> {
    jail.create_file(name, contents)?;
    Ok(name)
}

/// Converts any error implementing [`ToString`] into a [`figment::Error`].
///
/// Lets tests return crate errors from a jail closure with `?`.
#[expect(
    clippy::needless_pass_by_value,
    reason = "called from map_err, which hands the error over by value"
)]
pub fn figment_error<E: ToString>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}
