//! Field definition extraction.
//!
//! Walks a record depth-first and produces one [`FieldDefinition`] per leaf,
//! carrying the dotted key, derived flag and environment aliases, and the
//! field's annotations.

use crate::naming::{lower_first, split_words};
use crate::schema::{NestConfig, SchemaField, Slot, Tags, tags};
use crate::value::Value;

/// Everything the resolver needs to know about one leaf field.
pub struct FieldDefinition<'a> {
    key: String,
    field: &'a mut dyn Value,
    override_value: Option<String>,
    flag_alias: Option<String>,
    env_alias: Option<String>,
    default_value: Option<String>,
    required: bool,
    usage: String,
}

impl FieldDefinition<'_> {
    /// Dot-joined identifier path, for example `database.url`.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Storage borrowed from the record being loaded.
    #[must_use]
    pub fn field(&self) -> &dyn Value {
        &*self.field
    }

    pub(crate) fn field_mut(&mut self) -> &mut dyn Value {
        &mut *self.field
    }

    /// Text of the value the field held before loading, when non-zero.
    #[must_use]
    pub fn override_value(&self) -> Option<&str> {
        self.override_value.as_deref()
    }

    /// Long flag name without the leading dashes.
    #[must_use]
    pub fn flag_alias(&self) -> Option<&str> {
        self.flag_alias.as_deref()
    }

    /// Upper-cased environment variable name before the global prefix.
    #[must_use]
    pub fn env_alias(&self) -> Option<&str> {
        self.env_alias.as_deref()
    }

    /// Literal default from the `default` annotation.
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// Whether a missing value is fatal.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Help text for usage output.
    #[must_use]
    pub fn usage(&self) -> &str {
        &self.usage
    }
}

impl std::fmt::Debug for FieldDefinition<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDefinition")
            .field("key", &self.key)
            .field("type", &self.field.type_name())
            .field("override_value", &self.override_value)
            .field("flag_alias", &self.flag_alias)
            .field("env_alias", &self.env_alias)
            .field("default_value", &self.default_value)
            .field("required", &self.required)
            .field("usage", &self.usage)
            .finish()
    }
}

/// Name chains inherited from enclosing records.
#[derive(Debug, Default, Clone)]
struct Prefix {
    key: String,
    flag: String,
    env: String,
}

impl Prefix {
    fn child(&self, name: &str, annotations: Tags) -> Self {
        let (flag, env) = if let Some(explicit) = annotations.lookup(tags::PREFIX) {
            (explicit.to_lowercase(), explicit.to_uppercase())
        } else if annotations.is_true(tags::SPLIT_WORDS) {
            (split_words(name, "-"), split_words(name, "_").to_uppercase())
        } else {
            (name.to_lowercase(), name.to_uppercase())
        };
        Self {
            key: join(&self.key, ".", name),
            flag: join(&self.flag, "-", &flag),
            env: join(&self.env, "_", &env),
        }
    }
}

fn join(parent: &str, separator: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_owned()
    } else {
        format!("{parent}{separator}{segment}")
    }
}

/// Extracts the definitions for every leaf reachable from `record`.
///
/// Private, ignored and unsupported fields produce nothing. Nested records
/// contribute their leaves under a child prefix; `Option` fields holding
/// `None` are filled with their default first.
///
/// ```
/// use nest_config::{NestConfig, definitions};
///
/// #[derive(Default, NestConfig)]
/// struct Server {
///     #[nest(flag, env = "listen_addr")]
///     pub listen: String,
/// }
///
/// #[derive(Default, NestConfig)]
/// struct App {
///     pub server: Server,
/// }
///
/// let mut app = App::default();
/// let defs = definitions(&mut app);
/// assert_eq!(defs[0].key(), "server.listen");
/// assert_eq!(defs[0].flag_alias(), Some("server-listen"));
/// assert_eq!(defs[0].env_alias(), Some("SERVER_LISTEN_ADDR"));
/// ```
pub fn definitions(record: &mut dyn NestConfig) -> Vec<FieldDefinition<'_>> {
    let mut out = Vec::new();
    extract(record, &Prefix::default(), &mut out);
    out
}

fn extract<'a>(
    record: &'a mut dyn NestConfig,
    prefix: &Prefix,
    out: &mut Vec<FieldDefinition<'a>>,
) {
    for SchemaField {
        name,
        exported,
        tags: annotations,
        slot,
    } in record.fields()
    {
        if !exported || annotations.is_true(tags::IGNORED) {
            continue;
        }
        match slot {
            Slot::Record(child) => extract(child, &prefix.child(name, annotations), out),
            Slot::Leaf(field) => out.push(define(field, name, annotations, prefix)),
            Slot::Unsupported => {}
        }
    }
}

fn define<'a>(
    field: &'a mut dyn Value,
    name: &str,
    annotations: Tags,
    prefix: &Prefix,
) -> FieldDefinition<'a> {
    let split = annotations.is_true(tags::SPLIT_WORDS);

    let flag_alias = annotations.lookup(tags::FLAG).map(|explicit| {
        let alias = match explicit {
            "" if split => split_words(name, "-"),
            "" => lower_first(name),
            other => other.to_owned(),
        };
        join(&prefix.flag, "-", &alias)
    });

    let env_alias = annotations.lookup(tags::ENV).map(|explicit| {
        let alias = match explicit {
            "" if split => split_words(name, "_"),
            "" => name.to_owned(),
            other => other.to_owned(),
        };
        join(&prefix.env, "_", &alias).to_uppercase()
    });

    let override_value = (!field.is_zero()).then(|| field.to_text());

    FieldDefinition {
        key: join(&prefix.key, ".", name),
        override_value,
        flag_alias,
        env_alias,
        default_value: annotations.lookup(tags::DEFAULT).map(str::to_owned),
        required: annotations.is_true(tags::REQUIRED),
        usage: annotations.lookup(tags::USAGE).unwrap_or_default().to_owned(),
        field,
    }
}
