//! Process-wide default [`Configurator`] and free-function shortcuts.
//!
//! The default instance is created on first use.

use std::ffi::OsString;
use std::io::Write;
use std::sync::LazyLock;

use crate::configurator::Configurator;
use crate::error::NestError;
use crate::schema::Field;

static DEFAULT: LazyLock<Configurator> = LazyLock::new(Configurator::new);

/// Returns the process-wide configurator used by the free functions.
#[must_use]
pub fn global() -> &'static Configurator {
    &DEFAULT
}

/// Sets the environment prefix of the global configurator.
pub fn set_env_prefix(prefix: impl Into<String>) {
    DEFAULT.set_env_prefix(prefix);
}

/// Sets the program name of the global configurator.
pub fn set_name(name: impl Into<String>) {
    DEFAULT.set_name(name);
}

/// Replaces the argument vector of the global configurator.
pub fn set_args<I, T>(args: I)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    DEFAULT.set_args(args);
}

/// Replaces the help output sink of the global configurator.
pub fn set_output(output: impl Write + Send + 'static) {
    DEFAULT.set_output(output);
}

/// Loads `target` with the global configurator.
///
/// # Errors
///
/// See [`Configurator::load`].
pub fn load<T: Field + ?Sized>(target: &mut T) -> Result<(), NestError> {
    DEFAULT.load(target)
}
