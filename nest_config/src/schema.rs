//! Schema traits implemented by configuration records and their fields.
//!
//! `#[derive(NestConfig)]` implements [`NestConfig`] and [`Field`] for a
//! record. Leaf types get [`Field`] through the blanket impl over
//! [`Value`].

use crate::naming;
use crate::value::Value;

/// Annotation keys understood by the extractor.
pub mod tags {
    /// Truthy value skips the field and its subtree.
    pub const IGNORED: &str = "ignored";
    /// Literal default applied when no other source is set.
    pub const DEFAULT: &str = "default";
    /// Truthy value makes a missing value fatal.
    pub const REQUIRED: &str = "required";
    /// Truthy value word-splits derived names.
    pub const SPLIT_WORDS: &str = "split_words";
    /// Child prefix for nested records.
    pub const PREFIX: &str = "prefix";
    /// Marks the field as environment-sourced; the value is an alias.
    pub const ENV: &str = "env";
    /// Marks the field as flag-sourced; the value is an alias.
    pub const FLAG: &str = "flag";
    /// Help text shown in usage output.
    pub const USAGE: &str = "usage";
}

/// A record whose fields can be walked by the extractor.
pub trait NestConfig {
    /// Returns the record's fields in declaration order.
    fn fields(&mut self) -> Vec<SchemaField<'_>>;
}

/// Anything that can be stored in a schema field.
pub trait Field {
    /// Exposes how the extractor should treat this field.
    fn slot(&mut self) -> Slot<'_>;
}

impl<T: Value> Field for T {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Leaf(self)
    }
}

/// Storage kind of a schema field.
pub enum Slot<'a> {
    /// Scalar storage that receives a resolved value.
    Leaf(&'a mut dyn Value),
    /// Nested record that is expanded recursively.
    Record(&'a mut dyn NestConfig),
    /// Kinds the extractor skips silently.
    Unsupported,
}

impl std::fmt::Debug for Slot<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Leaf(value) => f.debug_tuple("Leaf").field(&value.type_name()).finish(),
            Self::Record(_) => f.write_str("Record"),
            Self::Unsupported => f.write_str("Unsupported"),
        }
    }
}

/// One field of a record as seen by the extractor.
#[derive(Debug)]
pub struct SchemaField<'a> {
    /// Field identifier, or the type identifier for tuple-struct fields.
    pub name: &'static str,
    /// `false` for fields without public visibility.
    pub exported: bool,
    /// Annotation table parsed from `#[nest(...)]`.
    pub tags: Tags,
    /// Storage handle borrowed from the record.
    pub slot: Slot<'a>,
}

/// Annotation table attached to a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tags(&'static [(&'static str, &'static str)]);

impl Tags {
    /// Wraps a static table of key/value pairs.
    #[must_use]
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self(entries)
    }

    /// Returns the value recorded for `key`, if the key is present.
    ///
    /// Present keys without a value yield `Some("")`.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&'static str> {
        self.0
            .iter()
            .find_map(|(name, value)| (*name == key).then_some(*value))
    }

    /// Returns `true` when `key` is present with a true literal.
    #[must_use]
    pub fn is_true(&self, key: &str) -> bool {
        self.lookup(key).is_some_and(naming::is_true)
    }
}
