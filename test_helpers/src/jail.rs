//! Environment isolation for tests that read process variables.
//!
//! Every helper runs its body inside a [`figment::Jail`], which holds a
//! process-wide lock and restores the environment afterwards. The jail starts
//! with no variables at all so host settings never leak into a load.

use anyhow::anyhow;
use figment::Jail;

/// Runs `body` in a jail with an empty environment.
///
/// # Errors
///
/// Returns the error produced by `body`, or a failure to set up the jail.
pub fn with_jail<F, T>(body: F) -> anyhow::Result<T>
where
    F: FnOnce(&mut Jail) -> figment::Result<T>,
{
    with_env(&[], body)
}

/// Runs `body` in a jail whose environment holds exactly `vars`.
///
/// ```
/// use test_helpers::jail::with_env;
///
/// let port = with_env(&[("APP_PORT", "8080")], |_| {
///     Ok(std::env::var("APP_PORT").ok())
/// })?;
/// assert_eq!(port.as_deref(), Some("8080"));
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns the error produced by `body`, or a failure to set up the jail.
pub fn with_env<F, T>(vars: &[(&str, &str)], body: F) -> anyhow::Result<T>
where
    F: FnOnce(&mut Jail) -> figment::Result<T>,
{
    let mut result = None;
    Jail::try_with(|jail| {
        jail.clear_env();
        for (name, value) in vars {
            jail.set_env(name, value);
        }
        result = Some(body(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!("jailed test failed: {err}"))?;
    result.ok_or_else(|| anyhow!("jailed test produced no result"))
}

/// Builds a [`figment::Error`] so non-figment failures can leave a jail
/// body through `?`.
#[must_use]
pub fn jail_error(message: &str) -> figment::Error {
    figment::Error::from(message)
}
