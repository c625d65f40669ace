//! Command-line flag declaration and parsing on top of the `clap` builder.

use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, Command, value_parser};

use crate::error::NestError;

const POSITIONALS: &str = "__positionals";
const HELP: &str = "help";

/// Long flags bound to definition keys for a single load.
#[derive(Debug)]
pub(crate) struct FlagSet {
    name: String,
    args: Vec<Arg>,
    bindings: Vec<(String, String)>,
}

impl FlagSet {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            args: Vec::new(),
            bindings: Vec::new(),
        }
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Declares `--alias` and binds it to `key`.
    ///
    /// Flags for boolean fields may be given without a value, meaning `true`.
    /// Other flags always take the next argument, even one starting with `-`.
    /// Declaring an alias twice binds the second key to the existing flag.
    pub(crate) fn declare(&mut self, alias: &str, key: &str, usage: &str, bare: bool) {
        let declared = self.bindings.iter().any(|(existing, _)| existing == alias);
        self.bindings.push((alias.to_owned(), key.to_owned()));
        if declared {
            return;
        }
        let arg = Arg::new(alias.to_owned())
            .long(alias.to_owned())
            .action(ArgAction::Set)
            .value_parser(value_parser!(String))
            .help(usage.to_owned());
        self.args.push(if bare {
            arg.num_args(0..=1).default_missing_value("true")
        } else {
            arg.num_args(1).allow_hyphen_values(true)
        });
    }

    /// Parses `args`, whose first element is the program name.
    ///
    /// Returns `(key, value)` pairs for flags present on the command line.
    ///
    /// A declared `help` alias is an ordinary flag; `-h` still asks for help.
    ///
    /// # Errors
    ///
    /// Returns [`NestError::FlagHelp`] for `-h`/`--help` and
    /// [`NestError::CliParsing`] for any other parse failure.
    pub(crate) fn parse(self, args: &[OsString]) -> Result<Vec<(String, String)>, NestError> {
        let help_claimed = self.bindings.iter().any(|(alias, _)| alias == HELP);
        let mut command = Command::new(self.name)
            .args_override_self(true)
            .disable_version_flag(true)
            .arg(
                Arg::new(POSITIONALS)
                    .num_args(0..)
                    .action(ArgAction::Append)
                    .value_parser(value_parser!(OsString))
                    .hide(true),
            )
            .args(self.args);
        if help_claimed {
            command = command.disable_help_flag(true).arg(
                Arg::new("__help")
                    .short('h')
                    .action(ArgAction::Help)
                    .hide(true),
            );
        }
        let matches = match command.try_get_matches_from(args) {
            Ok(matches) => matches,
            Err(err) if err.kind() == ErrorKind::DisplayHelp => return Err(NestError::FlagHelp),
            Err(err) => return Err(err.into()),
        };
        Ok(self
            .bindings
            .into_iter()
            .filter(|(alias, _)| matches.value_source(alias) == Some(ValueSource::CommandLine))
            .filter_map(|(alias, key)| {
                let value = matches.try_get_one::<String>(&alias).ok().flatten()?;
                Some((key, value.clone()))
            })
            .collect())
    }
}
