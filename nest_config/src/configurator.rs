//! Precedence resolution: registers definitions with the layered store and
//! flag set, then writes resolved values back into the record.

use std::ffi::OsString;
use std::io::{self, Write};

use parking_lot::Mutex;
use tracing::debug;

use crate::coerce::process_field;
use crate::definition::{FieldDefinition, definitions};
use crate::error::NestError;
use crate::flags::FlagSet;
use crate::schema::{Field, NestConfig, Slot};
use crate::store::{LayeredStore, Resolved};
use crate::usage;

struct State {
    name: Option<String>,
    args: Vec<OsString>,
    env_prefix: String,
    output: Box<dyn Write + Send>,
}

/// Loads configuration records from overrides, flags, environment variables
/// and defaults.
///
/// Settings are held behind a single lock shared with [`Configurator::load`],
/// so one configurator can be shared between threads and reused for several
/// records.
pub struct Configurator {
    state: Mutex<State>,
}

impl Default for Configurator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Configurator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Configurator")
            .field("name", &state.name)
            .field("args", &state.args)
            .field("env_prefix", &state.env_prefix)
            .finish_non_exhaustive()
    }
}

impl Configurator {
    /// Creates a configurator reading the process arguments and writing help
    /// to standard error.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                name: None,
                args: std::env::args_os().collect(),
                env_prefix: String::new(),
                output: Box::new(io::stderr()),
            }),
        }
    }

    /// Sets the prefix joined to every environment variable name with `_`.
    pub fn set_env_prefix(&self, prefix: impl Into<String>) {
        self.state.lock().env_prefix = prefix.into();
    }

    /// Sets the program name shown in help output.
    ///
    /// Defaults to the first argument.
    pub fn set_name(&self, name: impl Into<String>) {
        self.state.lock().name = Some(name.into());
    }

    /// Replaces the argument vector. The first element is the program name.
    pub fn set_args<I, T>(&self, args: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        self.state.lock().args = args.into_iter().map(Into::into).collect();
    }

    /// Replaces the sink that receives help output.
    pub fn set_output(&self, output: impl Write + Send + 'static) {
        self.state.lock().output = Box::new(output);
    }

    /// Populates `target` from all configured sources.
    ///
    /// Fields that already hold a non-zero value are treated as overrides and
    /// keep their value. Otherwise a flag beats an environment variable,
    /// which beats a default. Fields with no value from any source are left
    /// untouched.
    ///
    /// # Errors
    ///
    /// - [`NestError::NotStruct`] or [`NestError::NotStructPointer`] when
    ///   `target` is not a record.
    /// - [`NestError::FlagHelp`] after printing usage for `-h`/`--help`.
    /// - [`NestError::CliParsing`] for malformed arguments.
    /// - [`NestError::MissingRequired`] when a required field stays unset.
    /// - [`NestError::TypeConversion`] when a value does not parse. Fields
    ///   resolved before the failure keep their new values.
    pub fn load<T: Field + ?Sized>(&self, target: &mut T) -> Result<(), NestError> {
        let record = match target.slot() {
            Slot::Record(record) => record,
            Slot::Leaf(_) => return Err(NestError::NotStruct),
            Slot::Unsupported => return Err(NestError::NotStructPointer),
        };
        let mut state = self.state.lock();
        state.load(record)
    }
}

impl State {
    fn load(&mut self, record: &mut dyn NestConfig) -> Result<(), NestError> {
        let name = self.display_name();
        let mut defs = definitions(record);

        let mut store = LayeredStore::default();
        let mut flags = FlagSet::new(&name);
        for def in &defs {
            self.register(def, &mut store, &mut flags);
        }

        if !flags.is_empty() {
            match flags.parse(&self.args) {
                Ok(values) => {
                    for (key, value) in values {
                        store.set_flag(&key, value);
                    }
                }
                Err(NestError::FlagHelp) => {
                    self.print_usage(&name, &defs)?;
                    return Err(NestError::FlagHelp);
                }
                Err(err) => return Err(err),
            }
        }

        let resolved = store.resolve();
        for def in &mut defs {
            apply(def, &resolved)?;
        }
        Ok(())
    }

    fn display_name(&mut self) -> String {
        let from_args = self
            .args
            .first()
            .map(|arg| arg.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.name.get_or_insert(from_args).clone()
    }

    fn register(&self, def: &FieldDefinition<'_>, store: &mut LayeredStore, flags: &mut FlagSet) {
        let key = def.key();
        if let Some(value) = def.override_value() {
            store.set_override(key, value);
        }
        if let Some(alias) = def.flag_alias() {
            let bare = def.field().type_name() == "bool";
            flags.declare(alias, key, def.usage(), bare);
        }
        if let Some(alias) = def.env_alias() {
            store.bind_env(key, usage::env_name(&self.env_prefix, alias));
        }
        if let Some(value) = def.default_value() {
            store.set_default(key, value);
        }
    }

    fn print_usage(&mut self, name: &str, defs: &[FieldDefinition<'_>]) -> Result<(), NestError> {
        let text = usage::render(defs, &self.env_prefix);
        write!(self.output, "Usage of {name}:\n{text}")?;
        self.output.flush()?;
        Ok(())
    }
}

fn apply(def: &mut FieldDefinition<'_>, resolved: &Resolved) -> Result<(), NestError> {
    let key = def.key().to_owned();
    if !resolved.is_set(&key) {
        if def.is_required() {
            return Err(NestError::MissingRequired { key });
        }
        return Ok(());
    }
    let text = resolved.text(&key)?;
    let field = def.field_mut();
    let value = if text.is_empty() {
        field.zero_text()
    } else {
        text.as_str()
    };
    debug!(key = %key, source = %resolved.source(&key), "resolved configuration value");
    process_field(field, value)
}
