//! Layered key/value store backing precedence resolution.
//!
//! Each source is a named [`figment::Provider`]. The layers are merged so
//! that overrides beat flags, flags beat environment variables, and
//! environment variables beat defaults.

use std::borrow::Cow;

use figment::value::{Dict, Map, Value};
use figment::{Error, Figment, Metadata, Profile, Provider};
use tracing::trace;

use crate::error::NestError;

/// Static key/value pairs attributed to one source.
#[derive(Debug, Clone)]
struct Layer {
    name: &'static str,
    entries: Vec<(String, String)>,
}

impl Layer {
    const fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: Vec::new(),
        }
    }

    fn insert(&mut self, key: &str, value: String) {
        trace!(layer = self.name, key, "registered value");
        self.entries.push((key.to_owned(), value));
    }
}

impl Provider for Layer {
    fn metadata(&self) -> Metadata {
        Metadata::named(self.name)
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();
        for (key, value) in &self.entries {
            let segments: Vec<&str> = key.split('.').collect();
            insert_nested(&mut dict, &segments, Value::from(value.clone()));
        }
        Ok(Profile::Default.collect(dict))
    }
}

/// Keys bound to environment variable names, read when the store is merged.
///
/// Names are matched exactly and values are kept byte for byte, including
/// surrounding whitespace.
#[derive(Debug, Clone, Default)]
struct EnvLayer {
    bindings: Vec<(String, String)>,
}

impl Provider for EnvLayer {
    fn metadata(&self) -> Metadata {
        Metadata::named(ENVIRONMENT)
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();
        for (key, var) in &self.bindings {
            let Some(value) = std::env::var_os(var) else {
                continue;
            };
            let segments: Vec<&str> = key.split('.').collect();
            insert_nested(
                &mut dict,
                &segments,
                Value::from(value.to_string_lossy().into_owned()),
            );
        }
        Ok(Profile::Default.collect(dict))
    }
}

fn insert_nested(dict: &mut Dict, segments: &[&str], value: Value) {
    match segments {
        [] => {}
        [last] => {
            dict.insert((*last).to_owned(), value);
        }
        [head, rest @ ..] => {
            let entry = dict
                .entry((*head).to_owned())
                .or_insert_with(|| Value::from(Dict::new()));
            if let Value::Dict(_, child) = entry {
                insert_nested(child, rest, value);
            }
        }
    }
}

const DEFAULT: &str = "default";
const ENVIRONMENT: &str = "environment";
const FLAG: &str = "flag";
const OVERRIDE: &str = "override";

/// Registration side of the store: one instance per load.
#[derive(Debug, Clone)]
pub(crate) struct LayeredStore {
    defaults: Layer,
    env: EnvLayer,
    flags: Layer,
    overrides: Layer,
}

impl Default for LayeredStore {
    fn default() -> Self {
        Self {
            defaults: Layer::new(DEFAULT),
            env: EnvLayer::default(),
            flags: Layer::new(FLAG),
            overrides: Layer::new(OVERRIDE),
        }
    }
}

impl LayeredStore {
    pub(crate) fn set_default(&mut self, key: &str, value: &str) {
        self.defaults.insert(key, value.to_owned());
    }

    pub(crate) fn set_override(&mut self, key: &str, value: &str) {
        self.overrides.insert(key, value.to_owned());
    }

    pub(crate) fn set_flag(&mut self, key: &str, value: String) {
        self.flags.insert(key, value);
    }

    pub(crate) fn bind_env(&mut self, key: &str, var: String) {
        trace!(layer = ENVIRONMENT, key, var = %var, "bound variable");
        self.env.bindings.push((key.to_owned(), var));
    }

    /// Merges the layers, reading the environment at this point.
    pub(crate) fn resolve(&self) -> Resolved {
        Resolved {
            figment: Figment::new()
                .merge(self.defaults.clone())
                .merge(self.env.clone())
                .merge(self.flags.clone())
                .merge(self.overrides.clone()),
        }
    }
}

/// Merged view used to look values up by key.
#[derive(Debug)]
pub(crate) struct Resolved {
    figment: Figment,
}

impl Resolved {
    pub(crate) fn is_set(&self, key: &str) -> bool {
        self.figment.contains(key)
    }

    pub(crate) fn text(&self, key: &str) -> Result<String, NestError> {
        Ok(self.figment.extract_inner::<String>(key)?)
    }

    /// Name of the layer that supplied `key`.
    pub(crate) fn source(&self, key: &str) -> Cow<'static, str> {
        self.figment
            .find_metadata(key)
            .map_or(Cow::Borrowed("unknown"), |metadata| metadata.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use test_helpers::jail::{with_env, with_jail};

    use super::*;

    #[rstest]
    fn later_layers_win() -> anyhow::Result<()> {
        with_jail(|jail| {
            jail.set_env("APP_VALUE", "env");
            let mut store = LayeredStore::default();
            store.set_default("value", "default");
            store.bind_env("value", "APP_VALUE".into());
            let resolved = store.resolve();
            assert_eq!(resolved.text("value")?, "env");
            assert_eq!(resolved.source("value"), ENVIRONMENT);

            store.set_flag("value", "flag".into());
            assert_eq!(store.resolve().text("value")?, "flag");

            store.set_override("value", "override");
            let merged = store.resolve();
            assert_eq!(merged.text("value")?, "override");
            assert_eq!(merged.source("value"), OVERRIDE);
            Ok(())
        })
    }

    #[rstest]
    fn nested_keys_share_parents() -> anyhow::Result<()> {
        with_jail(|_| {
            let mut store = LayeredStore::default();
            store.set_default("sub.first", "1");
            store.set_default("sub.second", "2");
            let resolved = store.resolve();
            assert_eq!(resolved.text("sub.first")?, "1");
            assert_eq!(resolved.text("sub.second")?, "2");
            assert!(!resolved.is_set("sub.third"));
            Ok(())
        })
    }

    #[rstest]
    fn environment_values_keep_their_whitespace() -> anyhow::Result<()> {
        with_env(&[("NAME", "  padded  ")], |_| {
            let mut store = LayeredStore::default();
            store.bind_env("name", "NAME".into());
            assert_eq!(store.resolve().text("name")?, "  padded  ");
            Ok(())
        })
    }

    #[cfg(unix)]
    #[rstest]
    fn environment_names_match_exactly() -> anyhow::Result<()> {
        with_env(&[("name", "lower")], |_| {
            let mut store = LayeredStore::default();
            store.bind_env("name", "NAME".into());
            assert!(!store.resolve().is_set("name"));
            Ok(())
        })
    }

    #[rstest]
    fn empty_environment_values_count_as_set() -> anyhow::Result<()> {
        with_jail(|jail| {
            jail.set_env("EMPTY", "");
            let mut store = LayeredStore::default();
            store.bind_env("value", "EMPTY".into());
            store.bind_env("other", "MISSING".into());
            let resolved = store.resolve();
            assert!(resolved.is_set("value"));
            assert_eq!(resolved.text("value")?, "");
            assert!(!resolved.is_set("other"));
            Ok(())
        })
    }
}
