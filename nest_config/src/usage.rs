//! Help text for flags and environment variables.
//!
//! Rendering is a pure function of the extracted definitions and the
//! environment prefix, so callers can print usage without loading:
//!
//! ```
//! use nest_config::{NestConfig, definitions, usage};
//!
//! #[derive(Default, NestConfig)]
//! struct Config {
//!     /// Port to listen on.
//!     #[nest(flag, env, default = 8080)]
//!     pub port: i64,
//! }
//!
//! let mut config = Config::default();
//! let text = usage::render(&definitions(&mut config), "app");
//! assert_eq!(
//!     text,
//!     "\n\nFLAGS:\n\n      --port int   Port to listen on. (default 8080)\n\
//!      \n\nENVIRONMENT VARIABLES:\n\n      APP_PORT int   Port to listen on. (default 8080)\n",
//! );
//! ```

use crate::definition::FieldDefinition;

/// Builds the environment variable name for `alias` under `prefix`.
#[must_use]
pub fn env_name(prefix: &str, alias: &str) -> String {
    if prefix.is_empty() {
        alias.to_uppercase()
    } else {
        format!("{prefix}_{alias}").to_uppercase()
    }
}

/// Renders the `FLAGS:` and `ENVIRONMENT VARIABLES:` blocks.
///
/// Each title is surrounded by blank lines. A block is omitted when no
/// definition contributes to it. Each block is
/// aligned independently on its longest name-and-hint column.
#[must_use]
pub fn render(definitions: &[FieldDefinition<'_>], env_prefix: &str) -> String {
    let mut flags = Vec::new();
    let mut envs = Vec::new();

    for definition in definitions {
        let hint = hint(definition.field().type_name());
        let default = default_suffix(definition, hint);
        if let Some(alias) = definition.flag_alias() {
            let prefix = match hint {
                "bool" => format!("      --{alias}"),
                other => format!("      --{alias} {other}"),
            };
            flags.push((prefix, definition.usage(), default.clone()));
        }
        if let Some(alias) = definition.env_alias() {
            let prefix = format!("      {} {hint}", env_name(env_prefix, alias));
            envs.push((prefix, definition.usage(), default));
        }
    }

    let mut out = String::new();
    write_block(&mut out, "FLAGS:", &flags);
    write_block(&mut out, "ENVIRONMENT VARIABLES:", &envs);
    out
}

fn hint(type_name: &str) -> &str {
    match type_name {
        "i64" => "int",
        "u64" => "uint",
        "f64" => "float",
        "String" => "string",
        "Duration" => "duration",
        other => other,
    }
}

fn default_suffix(definition: &FieldDefinition<'_>, hint: &str) -> String {
    match (definition.default_value(), hint) {
        (None, _) => String::new(),
        (Some(value), "string") => format!(" (default {value:?})"),
        (Some(value), _) => format!(" (default {value})"),
    }
}

fn write_block(out: &mut String, title: &str, lines: &[(String, &str, String)]) {
    if lines.is_empty() {
        return;
    }
    let width = lines
        .iter()
        .map(|(prefix, _, _)| prefix.chars().count())
        .max()
        .unwrap_or_default();
    out.push_str("\n\n");
    out.push_str(title);
    out.push_str("\n\n");
    for (prefix, usage, default) in lines {
        out.push_str(&format!("{prefix:<width$}   {usage}{default}\n"));
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rstest::rstest;

    use super::*;
    use crate::{NestConfig, definitions};

    #[derive(Default, NestConfig)]
    struct Single {
        #[nest(flag)]
        pub value: String,
    }

    #[derive(Default, NestConfig)]
    struct Mixed {
        /// Enable verbose output.
        #[nest(flag, env)]
        pub verbose: bool,
        #[nest(flag, env, default = "local")]
        pub region: String,
        #[nest(flag = "retries", default = 3)]
        pub retry_count: u64,
        #[nest(env, default = "5s")]
        pub timeout: Duration,
        #[nest(flag, default = 1.5)]
        pub ratio: f64,
        #[nest(flag)]
        pub small: i32,
        pub silent: String,
    }

    #[rstest]
    fn single_flag_keeps_trailing_spacing() {
        let mut config = Single::default();
        let text = render(&definitions(&mut config), "");
        assert_eq!(text, "\n\nFLAGS:\n\n      --value string   \n");
    }

    #[rstest]
    fn blocks_align_independently() {
        let mut config = Mixed::default();
        let text = render(&definitions(&mut config), "app");
        let expected = concat!(
            "\n\nFLAGS:\n\n",
            "      --verbose         Enable verbose output.\n",
            "      --region string    (default \"local\")\n",
            "      --retries uint     (default 3)\n",
            "      --ratio float      (default 1.5)\n",
            "      --small i32       \n",
            "\n\nENVIRONMENT VARIABLES:\n\n",
            "      APP_VERBOSE bool       Enable verbose output.\n",
            "      APP_REGION string       (default \"local\")\n",
            "      APP_TIMEOUT duration    (default 5s)\n",
        );
        assert_eq!(text, expected);
    }

    #[rstest]
    fn nothing_declared_renders_nothing() {
        #[derive(Default, NestConfig)]
        struct Empty {
            pub plain: String,
        }
        let mut config = Empty::default();
        assert!(render(&definitions(&mut config), "").is_empty());
    }

    #[rstest]
    #[case("", "value", "VALUE")]
    #[case("app", "value", "APP_VALUE")]
    #[case("App", "Sub_Value", "APP_SUB_VALUE")]
    fn env_names_are_upper_cased(#[case] prefix: &str, #[case] alias: &str, #[case] expected: &str) {
        assert_eq!(env_name(prefix, alias), expected);
    }
}
